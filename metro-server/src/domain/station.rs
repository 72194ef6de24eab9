//! Station group and display-name types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an invalid station group id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station group: {reason}")]
pub struct InvalidStationGroup {
    reason: &'static str,
}

/// Canonical identifier for a rider-facing station.
///
/// One group merges every platform that shares a station name across lines
/// (the "travel group"). Group ids are assigned from 1 upwards, so zero is
/// never a valid group.
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationGroup;
///
/// let group = StationGroup::new(42).unwrap();
/// assert_eq!(group.get(), 42);
///
/// // Zero is rejected
/// assert!(StationGroup::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StationGroup(u32);

impl StationGroup {
    /// Create a station group from its numeric id.
    pub fn new(id: u32) -> Result<Self, InvalidStationGroup> {
        if id == 0 {
            return Err(InvalidStationGroup {
                reason: "group ids start at 1",
            });
        }
        Ok(StationGroup(id))
    }

    /// Returns the numeric id.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for StationGroup {
    type Error = InvalidStationGroup;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        StationGroup::new(id)
    }
}

impl From<StationGroup> for u32 {
    fn from(group: StationGroup) -> Self {
        group.0
    }
}

impl fmt::Debug for StationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationGroup({})", self.0)
    }
}

impl fmt::Display for StationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display names for a station group.
///
/// `cn` is the primary-language name and `en` the secondary one. Missing
/// names are filled with placeholders that embed the group id, so a lookup
/// for a known group always has something to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationDisplayInfo {
    pub cn: String,
    pub en: String,
}

impl StationDisplayInfo {
    /// Create display info for a group, substituting placeholders for blank names.
    pub fn new(group: StationGroup, cn: Option<&str>, en: Option<&str>) -> Self {
        Self {
            cn: non_blank(cn)
                .map(str::to_string)
                .unwrap_or_else(|| placeholder_cn(group)),
            en: non_blank(en)
                .map(str::to_string)
                .unwrap_or_else(|| placeholder_en(group)),
        }
    }

    /// Overwrite names with any non-blank values supplied.
    ///
    /// Blank or missing values leave the existing name untouched.
    pub fn merge(&mut self, cn: Option<&str>, en: Option<&str>) {
        if let Some(cn) = non_blank(cn) {
            self.cn = cn.to_string();
        }
        if let Some(en) = non_blank(en) {
            self.en = en.to_string();
        }
    }

    /// Display info for a group that has no entry at all.
    pub fn unknown() -> Self {
        Self {
            cn: "未知".to_string(),
            en: "Unknown".to_string(),
        }
    }
}

/// Trim a name and drop it if nothing is left.
pub(crate) fn non_blank(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|s| !s.is_empty())
}

fn placeholder_cn(group: StationGroup) -> String {
    format!("UNKNOWN_CN_{}", group)
}

fn placeholder_en(group: StationGroup) -> String {
    format!("UNKNOWN_EN_{}", group)
}
