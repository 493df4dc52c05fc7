use bevy::prelude::*;

/// Outcome of one asset pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StageStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl StageStatus {
    pub fn is_resolved(self) -> bool {
        self != StageStatus::Pending
    }
}

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub settings: StageStatus,
    pub environment: StageStatus,
    pub model: StageStatus,
}
