use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if (0. ..=100.).contains(&value) {
            Some(Percentage(value))
        } else {
            None
        }
    }

    pub fn zero() -> Percentage {
        Percentage(0.)
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `part` in `whole`. An empty whole has nothing completed, so it is 0%.
pub fn ratio_percentage(part: usize, whole: usize) -> Percentage {
    if whole == 0 {
        return Percentage::zero();
    }
    Percentage::new_opt(part.min(whole) as f64 / whole as f64 * 100.).unwrap_or(Percentage::zero())
}

#[cfg(test)]
mod tests {
    use super::{Percentage, ratio_percentage};

    #[test]
    fn test_ratio_percentage() {
        assert_eq!(*ratio_percentage(1, 4), 25.);
        assert_eq!(*ratio_percentage(3, 3), 100.);
        assert_eq!(*ratio_percentage(0, 0), 0.);
        assert_eq!(ratio_percentage(2, 3).to_string(), "67%");
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(Percentage::new_opt(-1.).is_none());
        assert!(Percentage::new_opt(100.5).is_none());
        assert!(Percentage::new_opt(50.).is_some());
    }
}
