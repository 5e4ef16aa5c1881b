// src/domain/snapshot/mutation.rs
use serde_json::{Map, Value};
use std::fmt;

/// A slash-joined path into the store, rooted at the database root,
/// e.g. `accounts/0555/routersID/dev1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorePath(Vec<String>);

impl StorePath {
    pub fn account(phone: &str) -> Self {
        StorePath(vec!["accounts".into(), phone.into()])
    }

    pub fn account_plan(phone: &str) -> Self {
        StorePath(vec!["accounts".into(), phone.into(), "plan".into()])
    }

    pub fn account_router(phone: &str, device_id: &str) -> Self {
        StorePath(vec![
            "accounts".into(),
            phone.into(),
            "routersID".into(),
            device_id.into(),
        ])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// An intended write against the store, produced by the domain services and
/// applied by the host application. The merge/replace distinction is part of
/// each service's contract: merges are field-level and survive concurrent
/// writers, replaces overwrite the whole node.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    /// Partial update: each listed field is written under `path`, other
    /// fields are left untouched. A `null` field value deletes that field,
    /// matching the store's update semantics.
    Merge {
        path: StorePath,
        fields: Map<String, Value>,
    },
    /// Full write of the node at `path`.
    Replace { path: StorePath, value: Value },
    /// Tombstone: the node at `path` is removed.
    Remove { path: StorePath },
}

impl Mutation {
    pub fn path(&self) -> &StorePath {
        match self {
            Mutation::Merge { path, .. } => path,
            Mutation::Replace { path, .. } => path,
            Mutation::Remove { path } => path,
        }
    }
}

/// Applies a mutation to an in-memory JSON tree with the same semantics the
/// external store uses. The services never call this; it exists so the
/// host application (and the tests) can reproduce store state locally.
pub fn apply(root: &mut Value, mutation: &Mutation) {
    match mutation {
        Mutation::Merge { path, fields } => {
            let node = descend(root, path.segments());
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let obj = node.as_object_mut().unwrap();
            for (key, value) in fields {
                if value.is_null() {
                    obj.remove(key);
                } else {
                    obj.insert(key.clone(), value.clone());
                }
            }
        }
        Mutation::Replace { path, value } => {
            let node = descend(root, path.segments());
            *node = value.clone();
        }
        Mutation::Remove { path } => {
            let (parent, leaf) = match path.segments().split_last() {
                Some((leaf, parent)) => (parent, leaf),
                None => return,
            };
            let node = descend(root, parent);
            if let Some(obj) = node.as_object_mut() {
                obj.remove(leaf.as_str());
            }
        }
    }
}

fn descend<'a>(root: &'a mut Value, segments: &[String]) -> &'a mut Value {
    let mut node = root;
    for segment in segments {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = node
            .as_object_mut()
            .unwrap()
            .entry(segment.clone())
            .or_insert(Value::Null);
    }
    node
}
