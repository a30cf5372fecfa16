//! Destination handles and type-erased binding slots.
//!
//! A destination is storage the caller owns; the parser only ever writes
//! through it. `ArgRef<T>` is the shared handle both sides hold, and
//! `BindSlot` is the erased seam that pairs a destination with its
//! converter so the registry can hold specifications of heterogeneous
//! value types behind one trait object.

use std::cell::RefCell;
use std::rc::Rc;

use crate::convert::{Convert, ConvertError};

/// Caller-owned handle to the storage an argument binds into.
///
/// The handle is a shared reference: the caller keeps one clone to read the
/// bound value after parsing, the specification keeps another to write
/// through. Handles are deliberately not `Send` — one parse is in flight at
/// a time against a given destination set.
#[derive(Debug)]
pub struct ArgRef<T> {
    inner: Rc<RefCell<T>>,
}

// Cloning shares the cell; the value type itself need not be cloneable.
impl<T> Clone for ArgRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> ArgRef<T> {
    /// Create a handle around an initial value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(initial)),
        }
    }

    /// Overwrite the stored value.
    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }

    /// Run a closure against the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }
}

impl<T: Clone> ArgRef<T> {
    /// Read the current bound value.
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}

/// Type-erased destination + converter pair held by a specification.
pub trait BindSlot {
    /// Convert the matched raw tokens and write them through the destination.
    fn assign(&self, raws: &[&str]) -> Result<(), ConvertError>;

    /// Write the converter's fixed truthy value (toggle flags).
    fn assign_true(&self) -> Result<(), ConvertError>;

    /// Whether `assign_true` can succeed. Checked at registration.
    fn supports_store_true(&self) -> bool;

    /// Whether the slot binds more than one value per match.
    fn supports_many(&self) -> bool;

    /// The converter's finite raw domain, when it has one.
    fn converter_choices(&self) -> Option<Vec<String>>;

    /// Convert a raw token and discard the result. Used to validate
    /// defaults at registration without touching the destination.
    fn probe(&self, raw: &str) -> Result<(), ConvertError>;

    /// Render the currently bound value in raw form.
    fn render(&self) -> String;
}

/// Slot binding a single value through a converter.
pub struct ValueSlot<C: Convert> {
    dest: ArgRef<C::Value>,
    converter: C,
}

impl<C: Convert> ValueSlot<C> {
    pub fn new(dest: &ArgRef<C::Value>, converter: C) -> Self {
        Self {
            dest: dest.clone(),
            converter,
        }
    }
}

impl<C: Convert> BindSlot for ValueSlot<C> {
    fn assign(&self, raws: &[&str]) -> Result<(), ConvertError> {
        // The scanner pairs scalar arities with exactly one token.
        let raw = raws
            .first()
            .ok_or_else(|| ConvertError::new("", "no value to bind".to_string()))?;
        let value = self.converter.from_str(raw)?;
        self.dest.set(value);
        Ok(())
    }

    fn assign_true(&self) -> Result<(), ConvertError> {
        match self.converter.true_value() {
            Some(value) => {
                self.dest.set(value);
                Ok(())
            }
            None => Err(ConvertError::new(
                "",
                "converter has no truthy value".to_string(),
            )),
        }
    }

    fn supports_store_true(&self) -> bool {
        self.converter.true_value().is_some()
    }

    fn supports_many(&self) -> bool {
        false
    }

    fn converter_choices(&self) -> Option<Vec<String>> {
        self.converter.default_choices()
    }

    fn probe(&self, raw: &str) -> Result<(), ConvertError> {
        self.converter.from_str(raw).map(|_| ())
    }

    fn render(&self) -> String {
        self.dest.with(|value| self.converter.to_str(value))
    }
}

/// Slot binding a fixed number of values into a `Vec` destination.
///
/// Each assignment replaces the whole vector, so a parser instance can be
/// reused across invocations without values accumulating.
pub struct ListSlot<C: Convert> {
    dest: ArgRef<Vec<C::Value>>,
    converter: C,
}

impl<C: Convert> ListSlot<C> {
    pub fn new(dest: &ArgRef<Vec<C::Value>>, converter: C) -> Self {
        Self {
            dest: dest.clone(),
            converter,
        }
    }
}

impl<C: Convert> BindSlot for ListSlot<C> {
    fn assign(&self, raws: &[&str]) -> Result<(), ConvertError> {
        let mut values = Vec::with_capacity(raws.len());
        for raw in raws {
            values.push(self.converter.from_str(raw)?);
        }
        self.dest.set(values);
        Ok(())
    }

    fn assign_true(&self) -> Result<(), ConvertError> {
        Err(ConvertError::new(
            "",
            "list destinations have no truthy value".to_string(),
        ))
    }

    fn supports_store_true(&self) -> bool {
        false
    }

    fn supports_many(&self) -> bool {
        true
    }

    fn converter_choices(&self) -> Option<Vec<String>> {
        self.converter.default_choices()
    }

    fn probe(&self, raw: &str) -> Result<(), ConvertError> {
        self.converter.from_str(raw).map(|_| ())
    }

    fn render(&self) -> String {
        self.dest.with(|values| {
            values
                .iter()
                .map(|v| self.converter.to_str(v))
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}
