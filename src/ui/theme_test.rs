use super::*;

use crate::dom::memory::{MemoryDom, MemoryElement};
use crate::storage::memory::MemoryStore;

fn page() -> (MemoryDom, MemoryElement, Rc<StorageAdapter<MemoryStore>>) {
    let dom = MemoryDom::new();
    let toggle = dom.create_element("button");
    toggle.set_class_name("btn theme-toggle");
    let icon = dom.create_element("i");
    icon.set_class_name("fas fa-moon");
    toggle.append_child(&icon);
    dom.body().append_child(&toggle);
    (dom, icon, Rc::new(StorageAdapter::new(MemoryStore::new())))
}

#[test]
fn init_defaults_to_light() {
    let (dom, icon, storage) = page();
    let themes = ThemeManager::new(dom.clone(), storage, "theme");
    assert_eq!(themes.init(), Theme::Light);
    assert_eq!(dom.root().attribute("data-theme").as_deref(), Some("light"));
    assert_eq!(icon.class_name(), "fas fa-moon");
}

#[test]
fn init_restores_raw_stored_theme() {
    let (dom, icon, storage) = page();
    storage.save_text("theme", "dark");
    let themes = ThemeManager::new(dom.clone(), storage, "theme");
    assert_eq!(themes.init(), Theme::Dark);
    assert_eq!(themes.current(), Theme::Dark);
    assert_eq!(dom.root().attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(icon.class_name(), "fas fa-sun");
}

#[test]
fn unknown_stored_value_falls_back_to_light() {
    let (dom, _icon, storage) = page();
    storage.save_text("theme", "\"solarized\"");
    let themes = ThemeManager::new(dom, storage, "theme");
    assert_eq!(themes.init(), Theme::Light);
}

#[test]
fn toggle_flips_applies_and_persists_as_text() {
    let (dom, icon, storage) = page();
    let themes = ThemeManager::new(dom.clone(), Rc::clone(&storage), "theme");
    themes.init();

    assert_eq!(themes.toggle(), Theme::Dark);
    assert_eq!(storage.load_text("theme").as_deref(), Some("dark"));
    assert_eq!(icon.class_name(), "fas fa-sun");

    assert_eq!(themes.toggle(), Theme::Light);
    assert_eq!(storage.load_text("theme").as_deref(), Some("light"));
    assert_eq!(dom.root().attribute("data-theme").as_deref(), Some("light"));
}

#[test]
fn apply_without_toggle_button_still_sets_root() {
    let dom = MemoryDom::new();
    let storage = Rc::new(StorageAdapter::new(MemoryStore::new()));
    let themes = ThemeManager::new(dom.clone(), storage, "theme");
    themes.apply(Theme::Dark);
    assert_eq!(dom.root().attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn theme_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Theme::Dark).expect("encode"), "\"dark\"");
    assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
    assert!("Dark".parse::<Theme>().is_err());
}
