use std::{collections::HashMap, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::typed_ast::{Entity, Function};

/// One frame of the scope stack.
#[derive(Debug, Default)]
pub struct Environment {
    pub entity_lookup: HashMap<String, Entity>,
    /// Function whose body this frame belongs to, for `confess`
    pub function: Option<Rc<Function>>,
}

impl Environment {
    pub fn new(function: Option<Rc<Function>>) -> Self {
        Environment {
            entity_lookup: HashMap::new(),
            function,
        }
    }

    /// Names are unique within a frame; shadowing an outer frame is fine.
    pub fn declare(
        &mut self,
        name: &str,
        entity: Entity,
        current_position: Position,
    ) -> Result<(), Error> {
        if self.entity_lookup.contains_key(name) {
            Err(Error::new(
                ErrorImpl::IdentifierAlreadyDeclared {
                    name: name.to_string(),
                },
                current_position,
            ))
        } else {
            self.entity_lookup.insert(name.to_string(), entity);
            Ok(())
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entity_lookup.get(name)
    }
}
