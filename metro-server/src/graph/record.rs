//! Raw connection records as supplied by an edge source.

use serde::{Deserialize, Serialize};

use crate::domain::{LineId, StationGroup, non_blank};

/// One undirected connection between two station groups.
///
/// Field names on the wire follow the `dijkstra` table layout used by the
/// upstream data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(rename = "from_station_travel_group")]
    pub from_group: StationGroup,

    #[serde(rename = "to_station_travel_group")]
    pub to_group: StationGroup,

    pub line_id: LineId,

    /// Ride time in minutes.
    pub travel_time: u32,

    #[serde(rename = "from_station_cn", default)]
    pub from_name_cn: Option<String>,

    #[serde(rename = "from_station_en", default)]
    pub from_name_en: Option<String>,

    #[serde(rename = "to_station_cn", default)]
    pub to_name_cn: Option<String>,

    #[serde(rename = "to_station_en", default)]
    pub to_name_en: Option<String>,
}

impl ConnectionRecord {
    /// Create a record with no display names.
    pub fn new(from_group: StationGroup, to_group: StationGroup, line_id: LineId, travel_time: u32) -> Self {
        Self {
            from_group,
            to_group,
            line_id,
            travel_time,
            from_name_cn: None,
            from_name_en: None,
            to_name_cn: None,
            to_name_en: None,
        }
    }

    /// Attach display names for both endpoints.
    pub fn with_names(
        mut self,
        from: (&str, &str),
        to: (&str, &str),
    ) -> Self {
        self.from_name_cn = Some(from.0.to_string());
        self.from_name_en = Some(from.1.to_string());
        self.to_name_cn = Some(to.0.to_string());
        self.to_name_en = Some(to.1.to_string());
        self
    }

    /// Whether both endpoints carry a primary-language name.
    ///
    /// Sources drop records that fail this check before handing them to the
    /// graph builder.
    pub fn is_named(&self) -> bool {
        non_blank(self.from_name_cn.as_deref()).is_some()
            && non_blank(self.to_name_cn.as_deref()).is_some()
    }
}

/// Keep only records with a primary name on both endpoints.
pub fn retain_named(records: Vec<ConnectionRecord>) -> Vec<ConnectionRecord> {
    records.into_iter().filter(ConnectionRecord::is_named).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: u32) -> StationGroup {
        StationGroup::new(id).unwrap()
    }

    #[test]
    fn deserialize_table_row() {
        let json = r#"{
            "from_station_travel_group": 1,
            "to_station_travel_group": 2,
            "line_id": 10,
            "travel_time": 3,
            "from_station_cn": "虹桥火车站",
            "from_station_en": "Hongqiao Railway Station",
            "to_station_cn": "虹桥2号航站楼",
            "to_station_en": null
        }"#;

        let record: ConnectionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.from_group, group(1));
        assert_eq!(record.to_group, group(2));
        assert_eq!(record.line_id, LineId(10));
        assert_eq!(record.travel_time, 3);
        assert_eq!(record.to_name_en, None);
        assert!(record.is_named());
    }

    #[test]
    fn missing_name_fields_default_to_none() {
        let json = r#"{
            "from_station_travel_group": 1,
            "to_station_travel_group": 2,
            "line_id": 1,
            "travel_time": 2
        }"#;

        let record: ConnectionRecord = serde_json::from_str(json).unwrap();
        assert!(record.from_name_cn.is_none());
        assert!(!record.is_named());
    }

    #[test]
    fn retain_named_drops_blank_primary_names() {
        let named = ConnectionRecord::new(group(1), group(2), LineId(1), 2)
            .with_names(("莘庄", "Xinzhuang"), ("外环路", "Waihuan Road"));
        let blank = ConnectionRecord::new(group(2), group(3), LineId(1), 2)
            .with_names(("外环路", "Waihuan Road"), ("  ", "Lianhua Road"));
        let unnamed = ConnectionRecord::new(group(3), group(4), LineId(1), 2);

        let kept = retain_named(vec![named.clone(), blank, unnamed]);
        assert_eq!(kept, vec![named]);
    }
}
