use ndarray::{Array3, ArrayView4};

/// Executes the detection model. Loading the model and picking a backend are up to the
/// implementation; the detector only relies on this contract:
///
/// * `input_shape` is the model input, expected `[1, H, W, 3]` channel-last f32.
/// * `output_shape` is the model output, expected `[1, 4 + num_classes, num_predictions]` f32.
/// * `run` fills `output` completely (it already has `output_shape`) or returns an error;
///   identical input gives identical output.
pub trait InferenceAdapter {
    fn input_shape(&self) -> Vec<usize>;

    fn output_shape(&self) -> Vec<usize>;

    fn run(&mut self, input: ArrayView4<f32>, output: &mut Array3<f32>) -> anyhow::Result<()>;

    /// Human readable backend name, for logs.
    fn backend(&self) -> String {
        "custom".to_string()
    }
}

impl<A: InferenceAdapter + ?Sized> InferenceAdapter for Box<A> {
    fn input_shape(&self) -> Vec<usize> {
        (**self).input_shape()
    }

    fn output_shape(&self) -> Vec<usize> {
        (**self).output_shape()
    }

    fn run(&mut self, input: ArrayView4<f32>, output: &mut Array3<f32>) -> anyhow::Result<()> {
        (**self).run(input, output)
    }

    fn backend(&self) -> String {
        (**self).backend()
    }
}
