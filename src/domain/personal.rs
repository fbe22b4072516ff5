use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// States offered on the billing address form.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum UsState {
    Ca,
    Tx,
    Ny,
    Fl,
    Il,
    Pa,
    Oh,
    Ga,
    Nc,
    Mi,
}

impl UsState {
    pub const ALL: [Self; 10] = [
        Self::Ca,
        Self::Tx,
        Self::Ny,
        Self::Fl,
        Self::Il,
        Self::Pa,
        Self::Oh,
        Self::Ga,
        Self::Nc,
        Self::Mi,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Ca => "CA",
            Self::Tx => "TX",
            Self::Ny => "NY",
            Self::Fl => "FL",
            Self::Il => "IL",
            Self::Pa => "PA",
            Self::Oh => "OH",
            Self::Ga => "GA",
            Self::Nc => "NC",
            Self::Mi => "MI",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ca => "California",
            Self::Tx => "Texas",
            Self::Ny => "New York",
            Self::Fl => "Florida",
            Self::Il => "Illinois",
            Self::Pa => "Pennsylvania",
            Self::Oh => "Ohio",
            Self::Ga => "Georgia",
            Self::Nc => "North Carolina",
            Self::Mi => "Michigan",
        }
    }
}

impl FromStr for UsState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|st| st.code() == s).ok_or(())
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Step 2 of the wizard, after validation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street_address: String,
    pub city: String,
    pub state: UsState,
    pub zip_code: String,
}

impl PersonalInformation {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_codes_round_trip_through_serde() {
        let json = serde_json::to_string(&UsState::Nc).unwrap();
        assert_eq!(json, "\"NC\"");
        let parsed: UsState = serde_json::from_str("\"MI\"").unwrap();
        assert_eq!(parsed, UsState::Mi);
    }

    #[test]
    fn test_unknown_state_rejected() {
        assert!("WA".parse::<UsState>().is_err());
        assert!("ca".parse::<UsState>().is_err());
        assert_eq!("GA".parse(), Ok(UsState::Ga));
    }
}
