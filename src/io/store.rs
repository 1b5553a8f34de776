//! In-memory hierarchical array store
//!
//! Arrays of any supported element type live under slash-separated paths in
//! nested groups. Entries may also be links: to another path of the same
//! store, or into a separate, shared store. Reading follows links
//! transparently.

use std::collections::BTreeMap;
use std::sync::Arc;

use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use tracing::{debug, trace};

use crate::io::configuration::{MAX_LINK_DEPTH, PATH_SEPARATOR};
use crate::io::error::{ArrayError, Result, invalid_argument};

/// Type-erased array held by a store
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayPayload {
    /// Boolean elements
    Bool(ArrayD<bool>),
    /// Unsigned 8-bit elements
    U8(ArrayD<u8>),
    /// Unsigned 16-bit elements
    U16(ArrayD<u16>),
    /// Unsigned 32-bit elements
    U32(ArrayD<u32>),
    /// Unsigned 64-bit elements
    U64(ArrayD<u64>),
    /// Signed 8-bit elements
    I8(ArrayD<i8>),
    /// Signed 16-bit elements
    I16(ArrayD<i16>),
    /// Signed 32-bit elements
    I32(ArrayD<i32>),
    /// Signed 64-bit elements
    I64(ArrayD<i64>),
    /// Single precision elements
    F32(ArrayD<f32>),
    /// Double precision elements
    F64(ArrayD<f64>),
}

/// Element types that can be placed in an [`ArrayPayload`]
pub trait Storable: Clone + Sized {
    /// Name of the element type, used in error messages
    const TYPE_NAME: &'static str;

    /// Wrap an owned array
    fn into_payload(array: ArrayD<Self>) -> ArrayPayload;

    /// Borrow the array back if the payload holds this element type
    fn from_payload(payload: &ArrayPayload) -> Option<&ArrayD<Self>>;
}

macro_rules! storable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Storable for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn into_payload(array: ArrayD<Self>) -> ArrayPayload {
                    ArrayPayload::$variant(array)
                }

                fn from_payload(payload: &ArrayPayload) -> Option<&ArrayD<Self>> {
                    match payload {
                        ArrayPayload::$variant(array) => Some(array),
                        _ => None,
                    }
                }
            }
        )*

        impl ArrayPayload {
            /// Name of the stored element type
            pub const fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($ty),)*
                }
            }

            /// Extent of every axis
            pub fn shape(&self) -> &[usize] {
                match self {
                    $(Self::$variant(array) => array.shape(),)*
                }
            }
        }
    };
}

storable!(
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);

impl ArrayPayload {
    /// Number of elements
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of a [`Group`]
#[derive(Debug, Clone)]
pub enum Node {
    /// Stored array
    Array(ArrayPayload),
    /// Nested group
    Group(Group),
    /// Absolute path to another entry of the same store
    Link(String),
    /// Path inside a separate store
    External {
        /// Store holding the target
        store: Arc<ArrayStore>,
        /// Absolute path of the target inside `store`
        path: String,
    },
}

/// Named collection of entries
#[derive(Debug, Clone, Default)]
pub struct Group {
    entries: BTreeMap<String, Node>,
}

fn split_path(path: &str) -> Result<(Vec<&str>, &str)> {
    let mut components: Vec<&str> = path
        .split(PATH_SEPARATOR)
        .filter(|component| !component.is_empty())
        .collect();
    let name = components
        .pop()
        .ok_or_else(|| invalid_argument("path", &path, &"path names no entry"))?;
    Ok((components, name))
}

impl Group {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry exists under `path` (links are not followed)
    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_some()
    }

    /// Names of the direct entries, in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of direct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the group has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry under `path` without following links
    pub fn node(&self, path: &str) -> Option<&Node> {
        let (parents, name) = split_path(path).ok()?;
        let mut group = self;
        for component in parents {
            match group.entries.get(component)? {
                Node::Group(child) => group = child,
                _ => return None,
            }
        }
        group.entries.get(name)
    }

    /// Open the subgroup `name`, creating it when missing
    ///
    /// With `overwrite`, an existing subgroup is emptied and any other entry
    /// under that name is replaced by a fresh group.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if a non-group entry exists and `overwrite` is not
    /// set, and `InvalidArgument` for an empty path.
    pub fn create_group(&mut self, name: &str, overwrite: bool) -> Result<&mut Self> {
        let (parents, leaf) = split_path(name)?;
        let parent = self.parent_mut(&parents, name)?;

        let slot = parent
            .entries
            .entry(leaf.to_string())
            .or_insert_with(|| Node::Group(Self::new()));
        let replace = match slot {
            Node::Group(_) => false,
            _ if overwrite => true,
            _ => {
                return Err(ArrayError::Conflict {
                    path: name.to_string(),
                });
            }
        };
        if replace {
            *slot = Node::Group(Self::new());
        }

        match slot {
            Node::Group(group) => {
                if overwrite {
                    group.entries.clear();
                }
                Ok(group)
            }
            _ => Err(ArrayError::Conflict {
                path: name.to_string(),
            }),
        }
    }

    /// Store an array under `path`, creating intermediate groups
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the entry exists and `overwrite` is not set, or
    /// if an intermediate component is not a group.
    pub fn write<T, S, D>(&mut self, path: &str, array: &ArrayBase<S, D>, overwrite: bool) -> Result<()>
    where
        T: Storable,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let payload = T::into_payload(array.to_owned().into_dyn());
        self.insert(path, Node::Array(payload), overwrite)
    }

    /// Store a link to another absolute path of the same store
    ///
    /// # Errors
    ///
    /// Same as [`Group::write`].
    pub fn link(&mut self, path: &str, target: &str, overwrite: bool) -> Result<()> {
        self.insert(path, Node::Link(target.to_string()), overwrite)
    }

    /// Store a link to a path inside another store
    ///
    /// # Errors
    ///
    /// Same as [`Group::write`].
    pub fn link_external(
        &mut self,
        path: &str,
        store: Arc<ArrayStore>,
        target: &str,
        overwrite: bool,
    ) -> Result<()> {
        let node = Node::External {
            store,
            path: target.to_string(),
        };
        self.insert(path, node, overwrite)
    }

    /// Remove and return the entry under `path`
    pub fn remove(&mut self, path: &str) -> Option<Node> {
        let (parents, name) = split_path(path).ok()?;
        let mut group = self;
        for component in parents {
            match group.entries.get_mut(component)? {
                Node::Group(child) => group = child,
                _ => return None,
            }
        }
        group.entries.remove(name)
    }

    fn insert(&mut self, path: &str, node: Node, overwrite: bool) -> Result<()> {
        let (parents, name) = split_path(path)?;
        let parent = self.parent_mut(&parents, path)?;

        if parent.entries.contains_key(name) && !overwrite {
            return Err(ArrayError::Conflict {
                path: path.to_string(),
            });
        }
        trace!(path, overwrite, "store entry written");
        parent.entries.insert(name.to_string(), node);
        Ok(())
    }

    fn parent_mut(&mut self, parents: &[&str], path: &str) -> Result<&mut Self> {
        let mut group = self;
        for component in parents {
            let node = group
                .entries
                .entry((*component).to_string())
                .or_insert_with(|| Node::Group(Self::new()));
            group = match node {
                Node::Group(child) => child,
                _ => {
                    return Err(ArrayError::Conflict {
                        path: path.to_string(),
                    });
                }
            };
        }
        Ok(group)
    }
}

/// Named root group, the unit that external links point into
#[derive(Debug, Clone, Default)]
pub struct ArrayStore {
    name: String,
    root: Group,
}

impl ArrayStore {
    /// Create an empty store
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: Group::new(),
        }
    }

    /// Name given at creation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root group
    pub const fn root(&self) -> &Group {
        &self.root
    }

    /// Root group, mutably
    pub const fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Store an array under `path`, see [`Group::write`]
    ///
    /// # Errors
    ///
    /// Same as [`Group::write`].
    pub fn write<T, S, D>(&mut self, path: &str, array: &ArrayBase<S, D>, overwrite: bool) -> Result<()>
    where
        T: Storable,
        S: Data<Elem = T>,
        D: Dimension,
    {
        self.root.write(path, array, overwrite)
    }

    /// Read the array under `path`, following links
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for missing entries or groups, `TypeMismatch` when
    /// the stored element type is not `T`, and `LinkDepth` when more than
    /// [`MAX_LINK_DEPTH`] links are followed.
    pub fn read<T: Storable>(&self, path: &str) -> Result<ArrayD<T>> {
        let payload = self.resolve(path, 0)?;
        debug!(store = %self.name, path, "read stored array");
        T::from_payload(payload)
            .cloned()
            .ok_or_else(|| ArrayError::TypeMismatch {
                path: path.to_string(),
                expected: T::TYPE_NAME,
                found: payload.type_name(),
            })
    }

    fn resolve(&self, path: &str, depth: usize) -> Result<&ArrayPayload> {
        if depth > MAX_LINK_DEPTH {
            return Err(ArrayError::LinkDepth {
                path: path.to_string(),
                limit: MAX_LINK_DEPTH,
            });
        }
        let not_found = || ArrayError::NotFound {
            path: path.to_string(),
        };

        match self.root.node(path).ok_or_else(not_found)? {
            Node::Array(payload) => Ok(payload),
            Node::Group(_) => Err(not_found()),
            Node::Link(target) => self.resolve(target, depth + 1),
            Node::External { store, path: target } => store.resolve(target, depth + 1),
        }
    }
}
