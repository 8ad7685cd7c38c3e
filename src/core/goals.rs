use crate::core::Vec2;
use crate::stage::Stage;

/// Indices of the boxes currently sitting on a goal, in ascending order.
pub fn active_boxes(boxes: &[Vec2], stage: &Stage) -> Vec<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| stage.is_goal(b))
        .map(|(i, _)| i)
        .collect()
}

pub fn count_boxes_on_goals(boxes: &[Vec2], stage: &Stage) -> usize {
    boxes.iter().filter(|&&b| stage.is_goal(b)).count()
}

/// All boxes are on goals. A stage without boxes is never solved.
pub fn is_solved(boxes: &[Vec2], stage: &Stage) -> bool {
    !boxes.is_empty() && count_boxes_on_goals(boxes, stage) == boxes.len()
}
