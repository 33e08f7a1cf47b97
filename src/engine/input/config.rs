// Input configuration and remapping system

use super::action::{default_bindings, Action, InputContext, InputSource};
use std::collections::HashMap;

/// Bindings for one input context
/// Maps input sources (keys/buttons) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Context these bindings belong to
    context: InputContext,

    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new(context: InputContext) -> Self {
        Self {
            context,
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration holding the default bindings of a context
    pub fn with_defaults(context: InputContext) -> Self {
        let mut config = Self::new(context);
        config.reset_to_defaults();
        config
    }

    /// Bind an input source to an action, replacing its previous action
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Reset to the default bindings of this context
    pub fn reset_to_defaults(&mut self) {
        self.bindings.clear();
        for (source, action) in default_bindings(self.context) {
            self.bind(source, action);
        }
    }
}

/// All binding sets: one per screen context plus the global set
#[derive(Debug)]
pub struct InputConfigManager {
    gameplay: InputConfig,
    menu: InputConfig,
    global: InputConfig,
}

impl InputConfigManager {
    /// Create a manager with default bindings everywhere
    pub fn new() -> Self {
        Self {
            gameplay: InputConfig::with_defaults(InputContext::Gameplay),
            menu: InputConfig::with_defaults(InputContext::Menu),
            global: InputConfig::with_defaults(InputContext::Global),
        }
    }

    pub fn get_config(&self, context: InputContext) -> &InputConfig {
        match context {
            InputContext::Gameplay => &self.gameplay,
            InputContext::Menu => &self.menu,
            InputContext::Global => &self.global,
        }
    }

    pub fn get_config_mut(&mut self, context: InputContext) -> &mut InputConfig {
        match context {
            InputContext::Gameplay => &mut self.gameplay,
            InputContext::Menu => &mut self.menu,
            InputContext::Global => &mut self.global,
        }
    }

    /// Get the action for a source in a context
    /// Checks the context's bindings first, then global bindings
    pub fn get_action(&self, context: InputContext, source: InputSource) -> Option<Action> {
        self.get_config(context)
            .get_action(source)
            .or_else(|| self.global.get_action(source))
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
