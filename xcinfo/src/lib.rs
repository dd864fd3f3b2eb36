//! Static metadata for the functionals the kernel library knows about:
//! names, library ids, families, kinds, capability flags and references.

mod table;

use itertools::Itertools;
use std::fmt;

pub use table::FUNCTIONALS;

// capability flags, bit-compatible with libxc's XC_FLAGS_HAVE_*

pub const XC_FLAGS_HAVE_EXC: u32 = 1 << 0;
pub const XC_FLAGS_HAVE_VXC: u32 = 1 << 1;
pub const XC_FLAGS_HAVE_FXC: u32 = 1 << 2;
pub const XC_FLAGS_HAVE_KXC: u32 = 1 << 3;

pub const XC_FLAGS_HAVE_ALL: u32 =
    XC_FLAGS_HAVE_EXC | XC_FLAGS_HAVE_VXC | XC_FLAGS_HAVE_FXC | XC_FLAGS_HAVE_KXC;

/// Highest energy derivative order any functional can provide.
pub const MAX_ORDER: usize = 3;

/// Flag bit advertising derivative `order`, `None` above `MAX_ORDER`.
pub fn order_flag(order: usize) -> Option<u32> {
    match order {
        0 => Some(XC_FLAGS_HAVE_EXC),
        1 => Some(XC_FLAGS_HAVE_VXC),
        2 => Some(XC_FLAGS_HAVE_FXC),
        3 => Some(XC_FLAGS_HAVE_KXC),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Lda,
    Gga,
}

impl Family {
    /// libxc's XC_FAMILY_* value.
    pub fn code(self) -> i32 {
        match self {
            Family::Lda => 1,
            Family::Gga => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Family> {
        match code {
            1 => Some(Family::Lda),
            2 => Some(Family::Gga),
            _ => None,
        }
    }

    pub fn needs_gradient(self) -> bool {
        self == Family::Gga
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Lda => write!(f, "lda"),
            Family::Gga => write!(f, "gga"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Exchange,
    Correlation,
    ExchangeCorrelation,
}

impl Kind {
    /// libxc's XC_EXCHANGE / XC_CORRELATION / XC_EXCHANGE_CORRELATION.
    pub fn code(self) -> i32 {
        match self {
            Kind::Exchange => 0,
            Kind::Correlation => 1,
            Kind::ExchangeCorrelation => 2,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Exchange => write!(f, "exchange"),
            Kind::Correlation => write!(f, "correlation"),
            Kind::ExchangeCorrelation => write!(f, "exchange-correlation"),
        }
    }
}

/// One journal reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Citation {
    pub reference: &'static str,
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reference)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionalDescriptor {
    pub name: &'static str,
    pub family: Family,
    pub kind: Kind,
    /// Key into the native functional table.
    pub library_id: i32,
    /// `XC_FLAGS_HAVE_*` bits of the reference implementation.
    pub flags: u32,
    pub description: &'static str,
    pub citations: &'static [Citation],
}

impl FunctionalDescriptor {
    pub fn has_order(&self, order: usize) -> bool {
        order_flag(order).map_or(false, |bit| self.flags & bit != 0)
    }
}

/// Read-only view over a table of functional descriptors.
///
/// Built once and passed by reference to whoever needs to resolve names.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    functionals: &'static [FunctionalDescriptor],
}

impl Default for Registry {
    fn default() -> Self {
        Registry::standard()
    }
}

impl Registry {
    /// The full table shipped with this crate.
    pub fn standard() -> Registry {
        Registry {
            functionals: FUNCTIONALS,
        }
    }

    pub fn from_table(functionals: &'static [FunctionalDescriptor]) -> Registry {
        Registry { functionals }
    }

    pub fn len(&self) -> usize {
        self.functionals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functionals.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<&'static FunctionalDescriptor> {
        let functionals = self.functionals;
        functionals.iter().find(|d| d.name == name)
    }

    pub fn lookup_id(&self, library_id: i32) -> Option<&'static FunctionalDescriptor> {
        let functionals = self.functionals;
        functionals.iter().find(|d| d.library_id == library_id)
    }

    /// Names of every functional, ordered by library id.
    pub fn names(&self) -> Vec<&'static str> {
        self.functionals
            .iter()
            .sorted_by_key(|d| d.library_id)
            .map(|d| d.name)
            .collect()
    }

    pub fn of_family(&self, family: Family) -> impl Iterator<Item = &'static FunctionalDescriptor> {
        let functionals = self.functionals;
        functionals.iter().filter(move |d| d.family == family)
    }

    pub fn description(&self, descriptor: &FunctionalDescriptor) -> &'static str {
        descriptor.description
    }

    pub fn citations(&self, descriptor: &FunctionalDescriptor) -> &'static [Citation] {
        descriptor.citations
    }
}
