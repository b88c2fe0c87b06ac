//! GST state and union territory codes.
//!
//! Jurisdictions may be given either as the two-letter abbreviation used on
//! the invoice form ("MH") or as the numeric GST state code ("27").

/// A GST jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub alpha: &'static str,
    pub numeric: &'static str,
    pub name: &'static str,
}

/// Look up a state by alpha or numeric code (case-insensitive, trimmed).
pub fn find_state(code: &str) -> Option<&'static State> {
    let code = code.trim();
    STATES
        .iter()
        .find(|s| s.numeric == code || s.alpha.eq_ignore_ascii_case(code))
}

/// Look up a state by its numeric GST code only, as embedded in a GSTIN.
pub fn find_state_numeric(code: &str) -> Option<&'static State> {
    STATES.iter().find(|s| s.numeric == code)
}

/// Whether `code` names a known GST state or union territory.
pub fn is_known_state_code(code: &str) -> bool {
    find_state(code).is_some()
}

/// Display form of a jurisdiction code: `"MH (Maharashtra)"`, or the code
/// unchanged when unknown.
pub fn describe(code: &str) -> String {
    match find_state(code) {
        Some(state) => format!("{} ({})", code.trim(), state.name),
        None => code.to_string(),
    }
}

/// Ordered by numeric code.
static STATES: &[State] = &[
    State { alpha: "JK", numeric: "01", name: "Jammu and Kashmir" },
    State { alpha: "HP", numeric: "02", name: "Himachal Pradesh" },
    State { alpha: "PB", numeric: "03", name: "Punjab" },
    State { alpha: "CH", numeric: "04", name: "Chandigarh" },
    State { alpha: "UK", numeric: "05", name: "Uttarakhand" },
    State { alpha: "HR", numeric: "06", name: "Haryana" },
    State { alpha: "DL", numeric: "07", name: "Delhi" },
    State { alpha: "RJ", numeric: "08", name: "Rajasthan" },
    State { alpha: "UP", numeric: "09", name: "Uttar Pradesh" },
    State { alpha: "BR", numeric: "10", name: "Bihar" },
    State { alpha: "SK", numeric: "11", name: "Sikkim" },
    State { alpha: "AR", numeric: "12", name: "Arunachal Pradesh" },
    State { alpha: "NL", numeric: "13", name: "Nagaland" },
    State { alpha: "MN", numeric: "14", name: "Manipur" },
    State { alpha: "MZ", numeric: "15", name: "Mizoram" },
    State { alpha: "TR", numeric: "16", name: "Tripura" },
    State { alpha: "ML", numeric: "17", name: "Meghalaya" },
    State { alpha: "AS", numeric: "18", name: "Assam" },
    State { alpha: "WB", numeric: "19", name: "West Bengal" },
    State { alpha: "JH", numeric: "20", name: "Jharkhand" },
    State { alpha: "OD", numeric: "21", name: "Odisha" },
    State { alpha: "CG", numeric: "22", name: "Chhattisgarh" },
    State { alpha: "MP", numeric: "23", name: "Madhya Pradesh" },
    State { alpha: "GJ", numeric: "24", name: "Gujarat" },
    State { alpha: "DN", numeric: "26", name: "Dadra and Nagar Haveli and Daman and Diu" },
    State { alpha: "MH", numeric: "27", name: "Maharashtra" },
    State { alpha: "KA", numeric: "29", name: "Karnataka" },
    State { alpha: "GA", numeric: "30", name: "Goa" },
    State { alpha: "LD", numeric: "31", name: "Lakshadweep" },
    State { alpha: "KL", numeric: "32", name: "Kerala" },
    State { alpha: "TN", numeric: "33", name: "Tamil Nadu" },
    State { alpha: "PY", numeric: "34", name: "Puducherry" },
    State { alpha: "AN", numeric: "35", name: "Andaman and Nicobar Islands" },
    State { alpha: "TS", numeric: "36", name: "Telangana" },
    State { alpha: "AP", numeric: "37", name: "Andhra Pradesh" },
    State { alpha: "LA", numeric: "38", name: "Ladakh" },
    State { alpha: "OT", numeric: "97", name: "Other Territory" },
];
