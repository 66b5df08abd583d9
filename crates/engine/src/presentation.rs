use hashdash_types::{Operation, PresentationMode};

use crate::resolve::{ResponseShape, response_shape};

/// Snapshot for operations without an interval axis whose response is a
/// single entity; timeseries for everything else.
pub fn choose_presentation(operation: &Operation) -> PresentationMode {
    let has_interval = operation.axes.iter().any(|axis| axis.is_interval());
    if !has_interval && response_shape(operation.resolver) == ResponseShape::Single {
        PresentationMode::Snapshot
    } else {
        PresentationMode::Timeseries
    }
}
