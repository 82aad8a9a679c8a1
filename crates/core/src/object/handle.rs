use super::value::{ResourceKey, Value};
use crate::metadata::TypeInfo;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// How an object's children were added, inferred from the opcodes used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContainerKind {
    #[default]
    None,
    Collection,
    Dictionary,
}

#[derive(Debug)]
enum NamedEntry {
    Object(Weak<RefCell<ObjectData>>),
    Value(Value),
}

#[derive(Debug)]
struct ObjectData {
    type_info: Arc<TypeInfo>,
    properties: Vec<(Arc<str>, Value)>,
    namespaces: Vec<(Arc<str>, Arc<str>)>,
    container: ContainerKind,
    markup_extension: bool,
    items: Vec<Value>,
    entries: Vec<(ResourceKey, Value)>,
    names: BTreeMap<Arc<str>, NamedEntry>,
}

/// Shared handle to an object built by the writer.
///
/// Clones alias the same object; equality is identity. Namescope entries hold
/// objects weakly, so a root that registers its own name does not leak.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ObjectRef {}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("ObjectRef")
            .field("type", &data.type_info.name)
            .field("properties", &data.properties.iter().map(|(name, _)| name).collect::<Vec<_>>())
            .field("container", &data.container)
            .field("items", &data.items.len())
            .field("entries", &data.entries.len())
            .finish()
    }
}

impl ObjectRef {
    pub fn new(type_info: Arc<TypeInfo>) -> Self {
        ObjectRef(Rc::new(RefCell::new(ObjectData {
            type_info,
            properties: Vec::new(),
            namespaces: Vec::new(),
            container: ContainerKind::None,
            markup_extension: false,
            items: Vec::new(),
            entries: Vec::new(),
            names: BTreeMap::new(),
        })))
    }

    pub fn type_info(&self) -> Arc<TypeInfo> {
        Arc::clone(&self.0.borrow().type_info)
    }

    pub fn type_name(&self) -> Arc<str> {
        Arc::clone(&self.0.borrow().type_info.name)
    }

    /// Sets a property, returning the value it replaced.
    pub fn set_property(&self, name: impl Into<Arc<str>>, value: Value) -> Option<Value> {
        let name = name.into();
        let mut data = self.0.borrow_mut();
        if let Some(slot) = data.properties.iter_mut().find(|(existing, _)| *existing == name) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        data.properties.push((name, value));
        None
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        self.0
            .borrow()
            .properties
            .iter()
            .find(|(existing, _)| &**existing == name)
            .map(|(_, value)| value.clone())
    }

    /// Properties in the order they were first set.
    pub fn properties(&self) -> Vec<(Arc<str>, Value)> {
        self.0.borrow().properties.clone()
    }

    pub fn add_namespace(&self, prefix: impl Into<Arc<str>>, namespace: impl Into<Arc<str>>) {
        self.0.borrow_mut().namespaces.push((prefix.into(), namespace.into()));
    }

    pub fn namespaces(&self) -> Vec<(Arc<str>, Arc<str>)> {
        self.0.borrow().namespaces.clone()
    }

    pub fn lookup_namespace(&self, prefix: &str) -> Option<Arc<str>> {
        self.0
            .borrow()
            .namespaces
            .iter()
            .rev()
            .find(|(existing, _)| &**existing == prefix)
            .map(|(_, namespace)| Arc::clone(namespace))
    }

    /// Registers `value` in this object's namescope.
    pub fn register_name(&self, name: impl Into<Arc<str>>, value: &Value) {
        let entry = match value {
            Value::Object(object) => NamedEntry::Object(Rc::downgrade(&object.0)),
            other => NamedEntry::Value(other.clone()),
        };
        self.0.borrow_mut().names.insert(name.into(), entry);
    }

    pub fn find_name(&self, name: &str) -> Option<Value> {
        match self.0.borrow().names.get(name)? {
            NamedEntry::Object(weak) => weak.upgrade().map(|data| Value::Object(ObjectRef(data))),
            NamedEntry::Value(value) => Some(value.clone()),
        }
    }

    /// Names registered in this object's namescope, sorted.
    pub fn names(&self) -> Vec<Arc<str>> {
        self.0.borrow().names.keys().cloned().collect()
    }

    pub fn container_kind(&self) -> ContainerKind {
        self.0.borrow().container
    }

    pub fn is_collection(&self) -> bool {
        self.container_kind() == ContainerKind::Collection
    }

    pub fn is_dictionary(&self) -> bool {
        self.container_kind() == ContainerKind::Dictionary
    }

    /// Reclassifies the object, returning the previous classification.
    pub fn set_container_kind(&self, kind: ContainerKind) -> ContainerKind {
        std::mem::replace(&mut self.0.borrow_mut().container, kind)
    }

    pub fn is_markup_extension(&self) -> bool {
        self.0.borrow().markup_extension
    }

    pub fn mark_markup_extension(&self) {
        self.0.borrow_mut().markup_extension = true;
    }

    pub fn add_item(&self, value: Value) {
        self.0.borrow_mut().items.push(value);
    }

    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().items.clone()
    }

    /// Inserts a dictionary entry, returning the value previously stored under `key`.
    pub fn add_entry(&self, key: ResourceKey, value: Value) -> Option<Value> {
        let mut data = self.0.borrow_mut();
        if let Some(slot) = data.entries.iter_mut().find(|(existing, _)| *existing == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        data.entries.push((key, value));
        None
    }

    pub fn entries(&self) -> Vec<(ResourceKey, Value)> {
        self.0.borrow().entries.clone()
    }

    pub fn entry(&self, key: &ResourceKey) -> Option<Value> {
        self.0
            .borrow()
            .entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TypeIndex;
    use crate::object::Constant;
    use rstest::{fixture, rstest};

    #[fixture]
    fn panel() -> ObjectRef {
        ObjectRef::new(Arc::new(TypeInfo::new(TypeIndex(1), "StackPanel")))
    }

    #[rstest]
    fn set_property_replaces_in_place(panel: ObjectRef) {
        assert!(panel.set_property("Tag", Constant::from("a").into()).is_none());
        panel.set_property("Width", Constant::Double(10.0).into());
        let previous = panel.set_property("Tag", Constant::from("b").into());

        assert_eq!(previous, Some(Value::Constant(Constant::from("a"))));
        let names: Vec<_> = panel.properties().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![Arc::from("Tag"), Arc::from("Width")]);
    }

    #[rstest]
    fn clones_alias_the_same_object(panel: ObjectRef) {
        let alias = panel.clone();
        alias.add_item(Constant::Int32(1).into());
        assert_eq!(panel.items().len(), 1);
        assert_eq!(panel, alias);
        assert_ne!(panel, ObjectRef::new(panel.type_info()));
    }

    #[rstest]
    fn namescope_holds_objects_weakly(panel: ObjectRef) {
        panel.register_name("self", &Value::Object(panel.clone()));
        {
            let child = ObjectRef::new(panel.type_info());
            panel.register_name("gone", &Value::Object(child));
        }

        assert_eq!(panel.find_name("self"), Some(Value::Object(panel.clone())));
        assert_eq!(panel.find_name("gone"), None);
        assert_eq!(Rc::strong_count(&panel.0), 1);
    }

    #[rstest]
    fn container_kind_is_last_write(panel: ObjectRef) {
        assert_eq!(panel.set_container_kind(ContainerKind::Collection), ContainerKind::None);
        assert!(panel.is_collection());
        assert_eq!(panel.set_container_kind(ContainerKind::Dictionary), ContainerKind::Collection);
        assert!(panel.is_dictionary());
        assert!(!panel.is_collection());
    }

    #[rstest]
    fn dictionary_entries_replace_duplicate_keys(panel: ObjectRef) {
        let key = ResourceKey::name("Accent");
        panel.add_entry(key.clone(), Constant::Color(1).into());
        let previous = panel.add_entry(key.clone(), Constant::Color(2).into());

        assert_eq!(previous, Some(Value::Constant(Constant::Color(1))));
        assert_eq!(panel.entries().len(), 1);
        assert_eq!(panel.entry(&key), Some(Value::Constant(Constant::Color(2))));
    }

    #[rstest]
    fn namespace_lookup_prefers_latest_declaration(panel: ObjectRef) {
        panel.add_namespace("x", "urn:one");
        panel.add_namespace("x", "urn:two");
        assert_eq!(panel.lookup_namespace("x").as_deref(), Some("urn:two"));
        assert_eq!(panel.lookup_namespace("y"), None);
    }
}
