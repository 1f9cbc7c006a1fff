use crate::common::Detection;
use crate::data::{DetectedBox, ImageSize, LabelTable};

/// Turns surviving detections into caller-facing boxes, keeping their order.
///
/// Class indices the label table does not cover are labeled [`crate::data::UNKNOWN_LABEL`].
pub fn assemble_boxes(detections: &[Detection], labels: &LabelTable, image_size: ImageSize) -> Vec<DetectedBox> {
    let (width, height) = (image_size.width as f32, image_size.height as f32);

    detections
        .iter()
        .map(|det| {
            if det.class_index >= labels.len() {
                log::warn!(
                    "Class index {} has no label ({} labels loaded)",
                    det.class_index,
                    labels.len()
                );
            }

            DetectedBox {
                index: det.class_index,
                label: labels.get_or_unknown(det.class_index).to_string(),
                confidence: det.confidence,
                pixel_rect: det.rect.scale_to(width, height),
                normalized_rect: det.rect,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DetRect;
    use crate::data::UNKNOWN_LABEL;

    #[test]
    fn pixel_and_normalized_rects() {
        let labels = LabelTable::from(&["plastic", "glass"][..]);
        let dets = [
            Detection::new(DetRect::new(0.25, 0.5, 0.75, 1.0), 1, 0.8),
            Detection::new(DetRect::new(0.0, 0.0, 1.0, 1.0), 7, 0.3),
        ];
        let boxes = assemble_boxes(&dets, &labels, ImageSize::new(200, 100));

        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].label, "glass");
        assert_eq!(boxes[0].pixel_rect, DetRect::new(50.0, 50.0, 150.0, 100.0));
        assert_eq!(boxes[0].normalized_rect, dets[0].rect);
        assert_eq!(boxes[1].index, 7);
        assert_eq!(boxes[1].label, UNKNOWN_LABEL);
        assert_eq!(boxes[1].pixel_rect, DetRect::new(0.0, 0.0, 200.0, 100.0));
    }
}
