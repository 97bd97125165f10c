//! Age bands.

use std::fmt;

/// Population age band with its own exposure and risk reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBand {
    /// Aged 65 and over.
    Over65,
    /// Aged under 65.
    Under65,
}

impl AgeBand {
    /// Both bands, older first.
    pub const ALL: [AgeBand; 2] = [AgeBand::Over65, AgeBand::Under65];

    /// Short label used in logs and output columns.
    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Over65 => "over65",
            AgeBand::Under65 => "under65",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per age band.
#[derive(Debug, Clone, PartialEq)]
pub struct ByBand<T> {
    over65: T,
    under65: T,
}

impl<T> ByBand<T> {
    /// Pairs the values of both bands.
    pub fn new(over65: T, under65: T) -> Self {
        Self { over65, under65 }
    }

    /// Value of one band.
    pub fn get(&self, band: AgeBand) -> &T {
        match band {
            AgeBand::Over65 => &self.over65,
            AgeBand::Under65 => &self.under65,
        }
    }

    /// `(band, value)` pairs, older band first.
    pub fn iter(&self) -> impl Iterator<Item = (AgeBand, &T)> {
        AgeBand::ALL.into_iter().map(move |b| (b, self.get(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(AgeBand::Over65.to_string(), "over65");
        assert_eq!(AgeBand::Under65.label(), "under65");
    }

    #[test]
    fn by_band_lookup() {
        let b = ByBand::new(1, 2);
        assert_eq!(*b.get(AgeBand::Over65), 1);
        assert_eq!(*b.get(AgeBand::Under65), 2);
        let pairs: Vec<_> = b.iter().map(|(band, v)| (band, *v)).collect();
        assert_eq!(pairs, vec![(AgeBand::Over65, 1), (AgeBand::Under65, 2)]);
    }
}
