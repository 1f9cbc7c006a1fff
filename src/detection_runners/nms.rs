pub trait Nms {
    fn iou(&self, other: &Self) -> f32;
    fn confidence(&self) -> f32;
    fn class_index(&self) -> usize;
}

/// Sorts `boxes` by confidence, highest first. Equal confidences keep their input order.
pub fn sort_by_confidence<T: Nms>(boxes: &mut [T]) {
    boxes.sort_by(|b1, b2| b2.confidence().total_cmp(&b1.confidence()));
}

/// Class-aware greedy non-maximum suppression, in place.
///
/// Each box that survives suppresses every later box of the same class whose IoU with it is
/// strictly greater than `iou_threshold`. Survivors stay in acceptance order, i.e. by
/// descending confidence. `suppressed` is scratch space, cleared here before use.
pub fn nms_per_class<T: Nms>(boxes: &mut Vec<T>, iou_threshold: f32, suppressed: &mut Vec<bool>) {
    sort_by_confidence(boxes);

    suppressed.clear();
    suppressed.resize(boxes.len(), false);

    for index in 0..boxes.len() {
        if suppressed[index] {
            continue;
        }
        for later in index + 1..boxes.len() {
            if suppressed[later] || boxes[later].class_index() != boxes[index].class_index() {
                continue;
            }
            if boxes[index].iou(&boxes[later]) > iou_threshold {
                suppressed[later] = true;
            }
        }
    }

    let mut keep = suppressed.iter().map(|s| !s);
    boxes.retain(|_| keep.next().unwrap_or(false));
}
