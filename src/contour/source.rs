use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ContourError, Result};
use crate::math::Point2;

use super::ContourModel;

/// A single `{x, y}` record in the contour source format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

/// Wire format supplied by the external contour loader:
/// `{ outPoints: [{x,y}], inPoints: [{x,y}], l, w }`.
///
/// Every field is optional; missing or `null` arrays read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContourData {
    #[serde(default)]
    pub out_points: Option<Vec<PointRecord>>,
    #[serde(default)]
    pub in_points: Option<Vec<PointRecord>>,
    #[serde(default)]
    pub l: Option<f64>,
    #[serde(default)]
    pub w: Option<f64>,
}

impl ContourData {
    /// Parses the source format from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ContourError::Parse`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ContourError::Parse(e).into())
    }

    /// Parses the source format from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`ContourError::Parse`] if the JSON is malformed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| ContourError::Parse(e).into())
    }

    /// Serializes the record back to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ContourError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ContourError::Parse(e).into())
    }
}

impl From<ContourData> for ContourModel {
    fn from(data: ContourData) -> Self {
        let outer = finite_points(data.out_points.unwrap_or_default(), "outPoints");
        let inner = finite_points(data.in_points.unwrap_or_default(), "inPoints");
        ContourModel::new(outer, inner).with_hints(data.l, data.w)
    }
}

impl From<&ContourModel> for ContourData {
    fn from(model: &ContourModel) -> Self {
        let records = |pts: &[Point2]| pts.iter().map(|p| PointRecord { x: p.x, y: p.y }).collect();
        Self {
            out_points: Some(records(model.outer())),
            in_points: Some(records(model.inner())),
            l: model.length_hint(),
            w: model.width_hint(),
        }
    }
}

fn finite_points(records: Vec<PointRecord>, field: &str) -> Vec<Point2> {
    let total = records.len();
    let points: Vec<Point2> = records
        .into_iter()
        .filter(|r| r.x.is_finite() && r.y.is_finite())
        .map(|r| Point2::new(r.x, r.y))
        .collect();
    if points.len() < total {
        warn!(field, dropped = total - points.len(), "dropped non-finite contour points");
    }
    points
}

/// Loads the initial contour version from a JSON file.
pub struct LoadContour {
    path: PathBuf,
}

impl LoadContour {
    /// Creates a new `LoadContour` operation.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Executes the load, returning contour version 0.
    ///
    /// # Errors
    ///
    /// Returns [`ContourError::Io`] if the file cannot be opened, or
    /// [`ContourError::Parse`] if its contents are malformed.
    pub fn execute(&self) -> Result<ContourModel> {
        let file = File::open(&self.path).map_err(ContourError::Io)?;
        let data = ContourData::from_reader(BufReader::new(file))?;
        let model = ContourModel::from(data);
        info!(
            path = %self.path.display(),
            outer = model.outer().len(),
            inner = model.inner().len(),
            "loaded contour"
        );
        Ok(model)
    }
}
