mod column;
mod encoders;
mod transform;

pub use column::{CategoricalColumn, NumericColumn};
pub use encoders::{OneHotEncoder, OrdinalEncoder, StandardScaler};
pub use transform::{FittedTransform, TransformSpec};
