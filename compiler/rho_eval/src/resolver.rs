//! Parameter resolution for builtins.
//!
//! Builtins take their actuals as a flat [`Args`] list. One that declares a
//! [`ParamResolver`] gets them matched first: exact names, then positional
//! fill in declared order, then type checks, dependency checks and defaults.
//! The builtin then sees one named entry per supplied or defaulted
//! parameter, in declared order.

use bitflags::bitflags;
use smallvec::SmallVec;

use rho_ir::{Name, StringInterner};
use rho_vector::VectorKind;

use crate::errors::{
    duplicate_argument, invalid_argument_type, missing_argument, unused_arguments, EvalError,
    EvalErrorKind,
};
use crate::value::{describe_actual, ListItem};
use crate::Value;

bitflags! {
    /// Value kinds a parameter accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TypeTags: u16 {
        const NUMERIC = 1;
        const LOGICAL = 1 << 1;
        const CHARACTER = 1 << 2;
        const FACTOR = 1 << 3;
        const DATETIME = 1 << 4;
        const LIST = 1 << 5;
        const NULL = 1 << 6;
        const FUNCTION = 1 << 7;
        const ENVIRONMENT = 1 << 8;
        const LANGUAGE = 1 << 9;

        /// Anything arithmetic accepts.
        const NUMBER = Self::NUMERIC.bits() | Self::LOGICAL.bits();
        const VECTOR = Self::NUMBER.bits()
            | Self::CHARACTER.bits()
            | Self::FACTOR.bits()
            | Self::DATETIME.bits();
        const ANY = Self::VECTOR.bits()
            | Self::LIST.bits()
            | Self::NULL.bits()
            | Self::FUNCTION.bits()
            | Self::ENVIRONMENT.bits()
            | Self::LANGUAGE.bits();
    }
}

impl TypeTags {
    /// The tag of a single value. Missing, errors, promises and packages
    /// have none.
    pub fn of(value: &Value) -> TypeTags {
        match value {
            Value::Vector(v) => match v.kind() {
                VectorKind::Numeric => TypeTags::NUMERIC,
                VectorKind::Logical => TypeTags::LOGICAL,
                VectorKind::Character => TypeTags::CHARACTER,
                VectorKind::Factor => TypeTags::FACTOR,
                VectorKind::DateTime => TypeTags::DATETIME,
            },
            Value::List(_) => TypeTags::LIST,
            Value::Null => TypeTags::NULL,
            Value::Closure(_) | Value::Builtin(_) => TypeTags::FUNCTION,
            Value::Env(_) => TypeTags::ENVIRONMENT,
            Value::Lang(_) => TypeTags::LANGUAGE,
            Value::Promise(_) | Value::Missing | Value::Error(_) | Value::Package(_) => {
                TypeTags::empty()
            }
        }
    }
}

/// Actual arguments handed to a native function.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    items: SmallVec<[ListItem; 4]>,
}

impl Args {
    pub fn new(items: impl IntoIterator<Item = ListItem>) -> Self {
        Args {
            items: items.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// The `i`th actual, named or not.
    pub fn get(&self, i: usize) -> Option<&Value> {
        self.items.get(i).map(|(_, v)| v)
    }

    pub fn named(&self, name: Name) -> Option<&Value> {
        self.items
            .iter()
            .find(|(n, _)| *n == Some(name))
            .map(|(_, v)| v)
    }

    pub fn into_items(self) -> Vec<ListItem> {
        self.items.into_vec()
    }
}

/// Computes a default from the parameters matched so far.
pub type DefaultThunk = fn(&ResolvedArgs<'_>) -> Option<Value>;

#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: String,
    pub required: bool,
    pub accepts: TypeTags,
    /// Supplying this parameter requires supplying the named one.
    pub requires: Option<String>,
    pub default: Option<DefaultThunk>,
}

/// Read access to the matched parameters, for default thunks.
pub struct ResolvedArgs<'a> {
    params: &'a [ParamSpec],
    slots: &'a [Option<Value>],
}

impl ResolvedArgs<'_> {
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.params.iter().position(|p| p.name == name)?;
        self.slots[index].as_ref()
    }
}

/// Declared parameters of a builtin.
#[derive(Clone, Debug, Default)]
pub struct ParamResolver {
    params: Vec<ParamSpec>,
}

impl ParamResolver {
    pub fn builder() -> ParamResolverBuilder {
        ParamResolverBuilder::default()
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Match `args` against the declared parameters.
    pub fn resolve(&self, args: Args, interner: &StringInterner) -> Result<Args, EvalError> {
        let mut slots: Vec<Option<Value>> = vec![None; self.params.len()];
        let mut unused: Vec<String> = Vec::new();
        let mut positional: Vec<ListItem> = Vec::new();

        for item in args.into_items() {
            let Some(name) = item.0 else {
                positional.push(item);
                continue;
            };
            let text = interner.lookup(name);
            match self.params.iter().position(|p| p.name == text) {
                Some(index) if slots[index].is_some() => return Err(duplicate_argument(text)),
                Some(index) => slots[index] = Some(item.1),
                None => unused.push(describe_actual(&item, interner)),
            }
        }

        let mut open = (0..self.params.len())
            .filter(|&i| slots[i].is_none())
            .collect::<Vec<_>>()
            .into_iter();
        for item in positional {
            match open.next() {
                Some(index) => slots[index] = Some(item.1),
                None => unused.push(describe_actual(&item, interner)),
            }
        }
        if !unused.is_empty() {
            return Err(unused_arguments(&unused));
        }

        for (param, slot) in self.params.iter().zip(&slots) {
            let Some(value) = slot else { continue };
            if !param.accepts.intersects(TypeTags::of(value)) {
                return Err(invalid_argument_type(&param.name));
            }
            if let Some(requires) = &param.requires {
                let supplied = self
                    .params
                    .iter()
                    .position(|p| &p.name == requires)
                    .is_some_and(|i| slots[i].is_some());
                if !supplied {
                    return Err(EvalError::from_kind(EvalErrorKind::ArgumentRequires {
                        name: param.name.clone(),
                        requires: requires.clone(),
                    }));
                }
            }
        }

        for index in 0..self.params.len() {
            if slots[index].is_some() {
                continue;
            }
            if let Some(default) = self.params[index].default {
                let value = default(&ResolvedArgs {
                    params: &self.params,
                    slots: &slots,
                });
                slots[index] = value;
            }
        }

        let mut items = SmallVec::with_capacity(self.params.len());
        for (param, slot) in self.params.iter().zip(slots) {
            match slot {
                Some(value) => items.push((Some(interner.intern(&param.name)), value)),
                None if param.required => return Err(missing_argument(&param.name)),
                None => {}
            }
        }
        Ok(Args { items })
    }
}

/// Fluent construction of a [`ParamResolver`].
#[derive(Default)]
pub struct ParamResolverBuilder {
    params: Vec<ParamSpec>,
}

impl ParamResolverBuilder {
    fn push(mut self, name: &str, required: bool, accepts: TypeTags) -> Self {
        self.params.push(ParamSpec {
            name: name.to_owned(),
            required,
            accepts,
            requires: None,
            default: None,
        });
        self
    }

    #[must_use]
    pub fn required(self, name: &str, accepts: TypeTags) -> Self {
        self.push(name, true, accepts)
    }

    #[must_use]
    pub fn optional(self, name: &str, accepts: TypeTags) -> Self {
        self.push(name, false, accepts)
    }

    /// The last declared parameter may only be supplied alongside `other`.
    #[must_use]
    pub fn requires(mut self, other: &str) -> Self {
        if let Some(last) = self.params.last_mut() {
            last.requires = Some(other.to_owned());
        }
        self
    }

    /// Default for the last declared parameter.
    #[must_use]
    pub fn with_default(mut self, thunk: DefaultThunk) -> Self {
        if let Some(last) = self.params.last_mut() {
            last.default = Some(thunk);
        }
        self
    }

    pub fn build(self) -> ParamResolver {
        ParamResolver {
            params: self.params,
        }
    }
}
