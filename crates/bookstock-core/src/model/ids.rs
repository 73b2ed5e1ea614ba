use std::fmt;
use std::str::FromStr;

/// Unique identifier for a catalog book, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(i64);

impl BookId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_display() {
        assert_eq!(BookId::new(42).to_string(), "42");
    }

    #[test]
    fn test_book_id_from_str() {
        assert_eq!("7".parse::<BookId>().unwrap(), BookId::new(7));
        assert!("seven".parse::<BookId>().is_err());
        assert!("".parse::<BookId>().is_err());
    }

    #[test]
    fn test_book_id_ordering() {
        assert!(BookId::new(1) < BookId::new(2));
    }
}
