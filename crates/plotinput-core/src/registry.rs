//! Registered modules, their arm state per button group, and selection menus.

use crate::input::PointerButton;
use crate::module::InteractionModule;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Button group a module can be armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonGroup {
    Primary,
    Secondary,
}

impl ButtonGroup {
    /// Group driven by a button. The right button opens menus and drives no group.
    pub fn for_button(button: PointerButton) -> Option<Self> {
        match button {
            PointerButton::Left => Some(ButtonGroup::Primary),
            PointerButton::Middle => Some(ButtonGroup::Secondary),
            PointerButton::Right => None,
        }
    }
}

/// Arm flags of one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArmState {
    pub primary: bool,
    pub secondary: bool,
}

impl ArmState {
    pub fn get(&self, group: ButtonGroup) -> bool {
        match group {
            ButtonGroup::Primary => self.primary,
            ButtonGroup::Secondary => self.secondary,
        }
    }

    pub fn set(&mut self, group: ButtonGroup, armed: bool) {
        match group {
            ButtonGroup::Primary => self.primary = armed,
            ButtonGroup::Secondary => self.secondary = armed,
        }
    }
}

/// One entry of a selection menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: String,
    pub armed: bool,
}

/// Menu of modules for one button group, for the shell to display.
///
/// The shell calls `arm`/`disarm` on the router with the chosen label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleMenu {
    pub group: ButtonGroup,
    /// Device-frame point the menu was requested at.
    pub position: Point,
    pub items: Vec<MenuItem>,
}

#[derive(Debug)]
struct Entry {
    module: InteractionModule,
    arm: ArmState,
}

/// Modules keyed by label, in registration order.
#[derive(Debug)]
pub struct ModuleRegistry {
    entries: Vec<Entry>,
    exclusive: bool,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ModuleRegistry {
    /// With `exclusive`, arming a module disarms the others in the same group.
    pub fn new(exclusive: bool) -> Self {
        Self {
            entries: Vec::new(),
            exclusive,
        }
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.module.label() == label)
    }

    /// Add a module. A module with the same label is replaced in place, keeping
    /// its arm state, and returned.
    pub fn register(&mut self, module: InteractionModule) -> Option<InteractionModule> {
        match self.position(module.label()) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].module, module)),
            None => {
                self.entries.push(Entry {
                    module,
                    arm: ArmState::default(),
                });
                None
            }
        }
    }

    pub fn unregister(&mut self, label: &str) -> Option<InteractionModule> {
        let index = self.position(label)?;
        Some(self.entries.remove(index).module)
    }

    pub fn get(&self, label: &str) -> Option<&InteractionModule> {
        self.entries.iter().find(|e| e.module.label() == label).map(|e| &e.module)
    }

    pub fn get_mut(&mut self, label: &str) -> Option<&mut InteractionModule> {
        self.entries
            .iter_mut()
            .find(|e| e.module.label() == label)
            .map(|e| &mut e.module)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.module.label())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut InteractionModule> {
        self.entries.iter_mut().map(|e| &mut e.module)
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Switch exclusive arming. Turning it on keeps only the first armed module per group.
    pub fn set_exclusive(&mut self, exclusive: bool) {
        self.exclusive = exclusive;
        if exclusive {
            for group in [ButtonGroup::Primary, ButtonGroup::Secondary] {
                let mut seen = false;
                for entry in &mut self.entries {
                    if entry.arm.get(group) {
                        if seen {
                            entry.arm.set(group, false);
                        }
                        seen = true;
                    }
                }
            }
        }
    }

    /// Arm a module for a group. Returns false when the label is unknown.
    pub fn arm(&mut self, label: &str, group: ButtonGroup) -> bool {
        let Some(index) = self.position(label) else {
            return false;
        };
        if self.exclusive {
            for entry in &mut self.entries {
                entry.arm.set(group, false);
            }
        }
        self.entries[index].arm.set(group, true);
        true
    }

    /// Disarm a module for a group. Returns false when the label is unknown.
    pub fn disarm(&mut self, label: &str, group: ButtonGroup) -> bool {
        match self.position(label) {
            Some(index) => {
                self.entries[index].arm.set(group, false);
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self, label: &str, group: ButtonGroup) -> bool {
        self.arm_state(label).is_some_and(|arm| arm.get(group))
    }

    pub fn arm_state(&self, label: &str) -> Option<ArmState> {
        self.entries.iter().find(|e| e.module.label() == label).map(|e| e.arm)
    }

    /// Labels armed for `group`, in registration order.
    pub fn armed_labels(&self, group: ButtonGroup) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.arm.get(group))
            .map(|e| e.module.label().to_string())
            .collect()
    }

    /// Menu listing every module with its arm flag for `group`.
    pub fn menu(&self, group: ButtonGroup, position: Point) -> ModuleMenu {
        ModuleMenu {
            group,
            position,
            items: self
                .entries
                .iter()
                .map(|e| MenuItem {
                    label: e.module.label().to_string(),
                    armed: e.arm.get(group),
                })
                .collect(),
        }
    }
}
