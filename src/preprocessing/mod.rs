//! Data preprocessing module
//!
//! Fitted preprocessing artifacts applied around the classifier:
//! - Feature scaling (Standard, MinMax, Robust, MaxAbs parameters)
//! - Label encoding between class indices and class names

mod scaler;
mod encoder;

pub use scaler::{Scaler, ScalerParams, ScalerType};
pub use encoder::LabelEncoder;
