use serde::{Deserialize, Serialize};
use crate::core::Vec2;
use crate::stage::InvalidStageError;

/// Serialized stage, shared by the loader and the editor.
///
/// Every field is optional at the serde level so that a missing key surfaces as
/// [`InvalidStageError::MissingField`] instead of a parse error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct StageDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(rename = "gridSize", skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Vec<Vec<i32>>>,
    #[serde(rename = "box", skip_serializing_if = "Option::is_none")]
    pub boxes: Option<Vec<Vec<i32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Vec<Vec<i32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human: Option<Vec<Vec<i32>>>,
}

impl StageDescriptor {
    pub fn from_cells(
        width: i32,
        height: i32,
        grid_size: i32,
        border: &[Vec2],
        boxes: &[Vec2],
        goal: &[Vec2],
        human: Option<Vec2>,
    ) -> Self {
        StageDescriptor {
            width: Some(width),
            height: Some(height),
            grid_size: Some(grid_size),
            border: Some(cells_to_pairs(border)),
            boxes: Some(cells_to_pairs(boxes)),
            goal: Some(cells_to_pairs(goal)),
            human: Some(cells_to_pairs(&human.into_iter().collect::<Vec<_>>())),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn cells_to_pairs(cells: &[Vec2]) -> Vec<Vec<i32>> {
    cells.iter().map(|c| vec![c.x, c.y]).collect()
}

pub(crate) fn required<'a, T>(
    field: &'a Option<T>,
    name: &'static str,
) -> Result<&'a T, InvalidStageError> {
    field.as_ref().ok_or(InvalidStageError::MissingField(name))
}

pub(crate) fn pairs_to_cells(
    pairs: &[Vec<i32>],
    kind: &'static str,
) -> Result<Vec<Vec2>, InvalidStageError> {
    pairs
        .iter()
        .map(|pair| match pair.as_slice() {
            &[x, y] => Ok(Vec2 { x, y }),
            _ => Err(InvalidStageError::MalformedCell { kind }),
        })
        .collect()
}
