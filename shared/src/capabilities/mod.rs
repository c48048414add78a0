mod file_picker;
mod geolocation;
mod notify;

pub use self::file_picker::{FilePicker, FilePickerOperation, FilePickerOutput};
pub use self::geolocation::{
    Geolocation, GeolocationError, GeolocationOperation, GeolocationResult, Position,
};
pub use self::notify::{Notification, Notify, NotifyOperation, Priority, Severity};

// Crux's built-in Render is enough for triggering view updates.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub geolocation: Geolocation<Event>,
    pub notify: Notify<Event>,
    pub file_picker: FilePicker<Event>,
}
