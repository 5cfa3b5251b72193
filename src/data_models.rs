use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::Group;
use crate::schema;
use crate::table::Cell;

pub const GROUP_COLUMN: &str = "group";
pub const TARGET_EC_COLUMN: &str = "target_ec";

/// A row type that can live in a unified dataset.
pub trait Record: Clone {
    /// Fixed column set, in output order. Present even when the dataset is empty.
    const COLUMNS: &'static [&'static str];

    fn group(&self) -> &str;

    fn target_ec(&self) -> f64;

    /// Cells for [`Record::COLUMNS`], same order.
    fn cells(&self) -> Vec<Cell>;

    /// Additional source columns carried through unchanged.
    fn extra(&self) -> &[(String, Cell)] {
        &[]
    }
}

/// One sensor sample, tagged with its group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentReading {
    pub group: String,
    pub target_ec: f64,
    pub time: Option<NaiveDateTime>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph: Option<f64>,
    pub ec: Option<f64>,
}

impl EnvironmentReading {
    pub fn new(group: &Group) -> Self {
        Self {
            group: group.name.clone(),
            target_ec: group.target_ec,
            time: None,
            temperature: None,
            humidity: None,
            ph: None,
            ec: None,
        }
    }
}

impl Record for EnvironmentReading {
    const COLUMNS: &'static [&'static str] = &[
        GROUP_COLUMN,
        TARGET_EC_COLUMN,
        schema::TIME,
        schema::TEMPERATURE,
        schema::HUMIDITY,
        schema::PH,
        schema::EC,
    ];

    fn group(&self) -> &str {
        &self.group
    }

    fn target_ec(&self) -> f64 {
        self.target_ec
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.group.clone()),
            Cell::Number(self.target_ec),
            self.time.into(),
            self.temperature.into(),
            self.humidity.into(),
            self.ph.into(),
            self.ec.into(),
        ]
    }
}

/// One specimen's measured traits, tagged with its group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthMeasurement {
    pub group: String,
    pub target_ec: f64,
    pub specimen_id: Option<String>,
    pub leaf_count: Option<f64>,
    pub shoot_length: Option<f64>,
    pub root_length: Option<f64>,
    pub fresh_weight: Option<f64>,
    #[serde(skip)]
    pub extra: Vec<(String, Cell)>,
}

impl GrowthMeasurement {
    pub fn new(group: &Group) -> Self {
        Self {
            group: group.name.clone(),
            target_ec: group.target_ec,
            specimen_id: None,
            leaf_count: None,
            shoot_length: None,
            root_length: None,
            fresh_weight: None,
            extra: Vec::new(),
        }
    }
}

impl Record for GrowthMeasurement {
    const COLUMNS: &'static [&'static str] = &[
        GROUP_COLUMN,
        TARGET_EC_COLUMN,
        schema::SPECIMEN_ID,
        schema::LEAF_COUNT,
        schema::SHOOT_LENGTH,
        schema::ROOT_LENGTH,
        schema::FRESH_WEIGHT,
    ];

    fn group(&self) -> &str {
        &self.group
    }

    fn target_ec(&self) -> f64 {
        self.target_ec
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.group.clone()),
            Cell::Number(self.target_ec),
            self.specimen_id.clone().into(),
            self.leaf_count.into(),
            self.shoot_length.into(),
            self.root_length.into(),
            self.fresh_weight.into(),
        ]
    }

    fn extra(&self) -> &[(String, Cell)] {
        &self.extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_follow_columns() {
        let group = Group::new("송도고", 1.0, "#FF6347");
        let mut reading = EnvironmentReading::new(&group);
        reading.ph = Some(6.2);

        let cells = reading.cells();
        assert_eq!(cells.len(), EnvironmentReading::COLUMNS.len());
        let ph_index = EnvironmentReading::COLUMNS.iter().position(|c| *c == "ph").unwrap();
        assert_eq!(cells[ph_index], Cell::Number(6.2));
        assert_eq!(cells[0], Cell::Text("송도고".into()));

        let measurement = GrowthMeasurement::new(&group);
        assert_eq!(measurement.cells().len(), GrowthMeasurement::COLUMNS.len());
        assert!(measurement.extra().is_empty());
    }
}
