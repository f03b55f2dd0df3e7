use std::collections::BTreeSet;
use std::fmt;

/// Why a menu answer was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A piece that is not a number (includes empty input)
    InvalidFormat(String),
    /// A 1-based number outside `1..=len`
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(_) => write!(
                f,
                "Invalid selection format. Please use numbers separated by commas."
            ),
            Self::OutOfRange { index, len } => write!(
                f,
                "Invalid selection: {index} is not between 1 and {len}."
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Set of chosen menu rows, stored 0-based
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// Parses `all`, `none` or a comma separated list of 1-based row numbers.
    ///
    /// Either every piece is valid or nothing is selected.
    pub fn parse(input: &str, len: usize) -> Result<Self, SelectionError> {
        let answer = input.trim().to_lowercase();

        match answer.as_str() {
            "all" => return Ok(Self::all(len)),
            "none" => return Ok(Self::none()),
            _ => {}
        }

        let mut indices = BTreeSet::new();
        for piece in answer.split(',') {
            let piece = piece.trim();
            let number: usize = piece
                .parse()
                .map_err(|_| SelectionError::InvalidFormat(piece.to_string()))?;

            if number == 0 || number > len {
                return Err(SelectionError::OutOfRange { index: number, len });
            }
            indices.insert(number - 1);
        }

        Ok(Self { indices })
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}
