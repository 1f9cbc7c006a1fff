mod det_image;
mod det_rect;
mod detection;
mod inference_device;
mod model_config;

pub use det_image::*;
pub use det_rect::*;
pub use detection::*;
pub use inference_device::*;
pub use model_config::*;
