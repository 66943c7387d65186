/// Render an operand-stack value the way `OUT` prints it.
///
/// Uses the shortest representation that round-trips (`f64`'s `Display`),
/// with negative zero folded into `0`.
///
/// # Examples
/// ```
/// use gdvm_core::format_value;
/// assert_eq!(format_value(7.0), "7");
/// assert_eq!(format_value(-0.0), "0");
/// assert_eq!(format_value(0.25), "0.25");
/// ```
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Number of decimal digits needed to print any offset below `count`.
///
/// Never less than one, so an empty body still gets a column.
pub fn width_for_count(count: usize) -> usize {
    let mut max = count.saturating_sub(1);
    let mut width = 1;
    while max >= 10 {
        max /= 10;
        width += 1;
    }
    width
}
