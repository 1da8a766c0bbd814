use crate::Point;

/// Distance of the corner star points from the edge: 3 on boards of 13 and
/// up, 2 below.
pub fn corner_offset(size: u8) -> u8 {
    if size >= 13 { 3 } else { 2 }
}

/// The four corner star points, or none when the board is too small to
/// have distinct ones.
pub fn corner_points(size: u8) -> Vec<Point> {
    let off = corner_offset(size);
    if size < 2 * off + 3 {
        return Vec::new();
    }
    let far = size - 1 - off;
    vec![(off, off), (far, off), (off, far), (far, far)]
}

/// Star (hoshi) points for an odd square board.
///
/// Every odd board has its center; boards of 7 and up add corners and
/// boards of 13 and up add the side midpoints.
pub fn star_points(size: u8) -> Vec<Point> {
    if size == 0 || size.is_multiple_of(2) {
        return Vec::new();
    }

    let mid = size / 2;
    let mut pts = corner_points(size);
    if size >= 13 {
        let off = corner_offset(size);
        let far = size - 1 - off;
        pts.extend([(off, mid), (far, mid), (mid, off), (mid, far)]);
    }
    pts.push((mid, mid));
    pts
}
