use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::FileRef;

/// The shell's file input.
#[derive(crux_core::macros::Capability)]
pub struct FilePicker<Ev> {
    context: CapabilityContext<FilePickerOperation, Ev>,
}

impl<Ev> FilePicker<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<FilePickerOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn open<F>(&self, accept: String, callback: F)
    where
        F: FnOnce(FilePickerOutput) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let output = context
                .request_from_shell(FilePickerOperation::Open { accept })
                .await;
            context.update_app(callback(output));
        });
    }

    /// Resets the shell's file input after a rejected selection.
    pub fn clear_selection(&self) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(FilePickerOperation::ClearSelection).await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FilePickerOperation {
    Open { accept: String },
    ClearSelection,
}

impl Operation for FilePickerOperation {
    type Output = FilePickerOutput;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FilePickerOutput {
    Selected(FileRef),
    Cancelled,
}

impl FilePickerOutput {
    #[must_use]
    pub fn into_file(self) -> Option<FileRef> {
        match self {
            Self::Selected(file) => Some(file),
            Self::Cancelled => None,
        }
    }
}
