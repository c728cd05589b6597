use crate::bbox::{BBox, Ltrb};

/// Intersection over union of two boxes, 0 for disjoint or degenerate input
pub fn iou(a: &BBox<Ltrb>, b: &BBox<Ltrb>) -> f32 {
    let i_left = a.left().max(b.left()) as i64;
    let i_top = a.top().max(b.top()) as i64;
    let i_right = a.right().min(b.right()) as i64;
    let i_bottom = a.bottom().min(b.bottom()) as i64;

    let i_area = (i_right - i_left).max(0) * (i_bottom - i_top).max(0);
    let union = a.area() + b.area() - i_area;

    if union <= 0 {
        return 0.0;
    }

    (i_area as f64 / union as f64) as f32
}
