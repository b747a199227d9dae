mod preference_kind;
mod preference_value;
#[allow(clippy::module_inception)]
mod preferences;

pub use {
    preference_kind::PreferenceKind, preference_value::PreferenceValue, preferences::Preferences,
};
