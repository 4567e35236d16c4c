//==================================================
// File: stdlib_registry.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Track the native modules scripts can import
// Objective: Resolve `importar(nombre)` to the installer that registers the
//            module's commands
//==================================================

use std::collections::HashMap;

use crate::modules::{self, ModuleContext, ModuleRegistry};

//==================================================
// Section 1.0 - Registry Types
//==================================================

/// Registers a module's commands and may seed memory on import.
pub type ModuleInstaller = fn(&mut ModuleRegistry, &mut ModuleContext<'_>);

#[derive(Clone)]
pub struct StdlibRegistry {
    modules: HashMap<String, ModuleInstaller>,
}

impl Default for StdlibRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl StdlibRegistry {
    /// A registry with no modules.
    pub fn empty() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("tiempo", modules::tiempo::install);
        registry.register("sistema", modules::sistema::install);
        registry.register("random", modules::random::install);
        registry.register("archivos", modules::archivos::install);
        registry.register("web", modules::web::install);
        registry
    }

    pub fn module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn register(&mut self, name: &str, installer: ModuleInstaller) {
        self.modules.insert(name.to_string(), installer);
    }

    pub fn resolve(&self, name: &str) -> Option<ModuleInstaller> {
        self.modules.get(name).copied()
    }
}


//==================================================
// End of file
//==================================================
