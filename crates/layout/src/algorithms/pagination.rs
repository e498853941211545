pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Centralized logic to check if a child fits in the remaining space.
///
/// * `cursor_y`: The current absolute Y position on the page.
/// * `child_height`: The required height for the child.
/// * `bottom`: The lowest Y the content area allows.
pub fn check_child_fit(cursor_y: f32, child_height: f32, bottom: f32) -> BreakAnalysis {
    let available = (bottom - cursor_y).max(0.0);
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f32 = 0.01;
    BreakAnalysis {
        should_break: child_height > available + EPSILON,
        remaining_height: available,
    }
}
