mod de;
mod messages;
mod query;
mod status;

pub use messages::{
    ACCESS_DENIED, AuthRequest, AuthResponse, OpResponse, QueryForm, QueryFormRequest, QueryRef,
    SessionRequest, Settings, SettingsUpdate, SoundRequest, is_access_denied,
};
pub use query::{DashboardSnapshot, DisplayValue, QuerySnapshot};
pub use status::{QueryStatus, status_label};
