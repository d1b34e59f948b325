use crate::error::Result;
use crate::store::DataStore;
use crate::theme::ThemeName;

/// The saved theme, or `default` when none was ever saved.
pub fn theme<S: DataStore>(store: &S, default: ThemeName) -> Result<ThemeName> {
    Ok(store.load_theme()?.unwrap_or(default))
}

pub fn set_theme<S: DataStore>(store: &mut S, theme: ThemeName) -> Result<()> {
    tracing::debug!(%theme, "saving theme preference");
    store.save_theme(theme)
}

/// Switches light/dark and persists the result.
pub fn toggle_theme<S: DataStore>(store: &mut S, default: ThemeName) -> Result<ThemeName> {
    let next = theme(store, default)?.toggle();
    set_theme(store, next)?;
    Ok(next)
}
