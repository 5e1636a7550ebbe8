pub mod params;
pub mod tool;

pub use params::{EdgeBinPolicy, HogParams, OrientationMode, INTENSITY_SCALE, ORIENTATION_SPAN_DEG};
pub use tool::{load_config, HogOutputConfig, HogToolConfig, WindowConfig};
