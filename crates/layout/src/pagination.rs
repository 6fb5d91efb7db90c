use coursedoc_types::Rect;

pub struct BreakAnalysis {
    pub should_break: bool,
}

/// Checks whether content of `child_height` fits below the cursor.
///
/// * `cursor_y`: The current Y position relative to the top of the content area.
/// * `child_height`: The height that has to fit.
/// * `bounds`: The content area of the current page.
pub fn check_child_fit(cursor_y: f32, child_height: f32, bounds: Rect) -> BreakAnalysis {
    let available = (bounds.height - cursor_y).max(0.0);
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f32 = 0.01;
    BreakAnalysis {
        should_break: child_height > available + EPSILON,
    }
}
