//! Region selection: which registry regions take part in a run.

use std::fmt;
use std::str::FromStr;

use crate::RegionError;

/// Either every region in the registry or an explicit list of codes.
///
/// Parsed from `"ALL"` or from codes split by commas without spaces, e.g.
/// `"CAOP,ILIP,INOP,MNOP"`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum RegionSelector {
    #[default]
    All,
    Codes(Vec<String>),
}

impl FromStr for RegionSelector {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            return Ok(RegionSelector::All);
        }
        let codes: Vec<String> = s.split(',').map(str::to_owned).collect();
        let malformed = codes
            .iter()
            .any(|c| c.is_empty() || c == "ALL" || c.chars().any(char::is_whitespace));
        if malformed {
            return Err(RegionError::InvalidSelector(s.to_owned()));
        }
        for (i, c) in codes.iter().enumerate() {
            if codes[..i].contains(c) {
                return Err(RegionError::InvalidSelector(s.to_owned()));
            }
        }
        Ok(RegionSelector::Codes(codes))
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSelector::All => f.write_str("ALL"),
            RegionSelector::Codes(codes) => f.write_str(&codes.join(",")),
        }
    }
}
