use std::fmt;
use std::marker::PhantomData;

use folio_types::{is_valid_type_name, TypeTag};

use crate::attachment::{Attachment, AttachmentSet};
use crate::error::{StoreError, StoreResult};

/// Marker for a fungible value type.
///
/// `TYPE_NAME` is checked when the crate using the type is compiled; a name
/// that [`TypeTag::parse`] would reject fails the build.
///
/// Implementors are usually zero-sized types that only name the tag:
///
/// ```
/// use folio_store::CoinType;
///
/// struct Usd;
/// impl CoinType for Usd {
///     const TYPE_NAME: &'static str = "folio::coin::USD";
/// }
/// ```
///
/// An unqualified name does not build:
///
/// ```compile_fail
/// use folio_store::{deposit, AttachmentSet, Coin, CoinType};
///
/// struct Bare;
/// impl CoinType for Bare {
///     const TYPE_NAME: &'static str = "USD";
/// }
///
/// let mut set = AttachmentSet::new();
/// deposit(&mut set, Coin::<Bare>::new(5)).unwrap();
/// ```
pub trait CoinType: 'static + Send + Sync {
    /// Fully-qualified name, e.g. `folio::coin::USD`.
    const TYPE_NAME: &'static str;

    #[doc(hidden)]
    const TYPE_NAME_IS_VALID: () = assert!(
        is_valid_type_name(Self::TYPE_NAME),
        "CoinType::TYPE_NAME must be fully qualified (module::Name)"
    );

    fn type_tag() -> TypeTag {
        #[allow(clippy::let_unit_value)]
        let () = Self::TYPE_NAME_IS_VALID;
        TypeTag::from_static(Self::TYPE_NAME)
    }
}

/// An amount of value type `T` that is not yet attached to anything.
pub struct Coin<T: CoinType> {
    value: u64,
    _type: PhantomData<fn() -> T>,
}

/// Spelling used at deposit boundaries.
pub type AmountOf<T> = Coin<T>;

impl<T: CoinType> Coin<T> {
    pub fn new(value: u64) -> Self {
        Self {
            value,
            _type: PhantomData,
        }
    }

    pub fn zero() -> Self {
        Self::new(0)
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Absorb `other` into this coin.
    pub fn join(&mut self, other: Coin<T>) -> StoreResult<()> {
        self.value = checked_sum::<T>(self.value, other.value)?;
        Ok(())
    }
}

impl<T: CoinType> Clone for Coin<T> {
    fn clone(&self) -> Self {
        Self::new(self.value)
    }
}

impl<T: CoinType> PartialEq for Coin<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: CoinType> Eq for Coin<T> {}

impl<T: CoinType> fmt::Debug for Coin<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coin<{}>({})", T::TYPE_NAME, self.value)
    }
}

/// Non-negative accumulator of `T`, attached to a container.
///
/// Merging adds; nothing subtracts.
pub struct Balance<T: CoinType> {
    value: u64,
    _type: PhantomData<fn() -> T>,
}

impl<T: CoinType> Balance<T> {
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl<T: CoinType> From<Coin<T>> for Balance<T> {
    fn from(coin: Coin<T>) -> Self {
        Self {
            value: coin.value,
            _type: PhantomData,
        }
    }
}

impl<T: CoinType> Clone for Balance<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            _type: PhantomData,
        }
    }
}

impl<T: CoinType> fmt::Debug for Balance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Balance<{}>({})", T::TYPE_NAME, self.value)
    }
}

impl<T: CoinType> Attachment for Balance<T> {
    fn type_tag() -> TypeTag {
        T::type_tag()
    }

    fn value(&self) -> u64 {
        self.value
    }

    fn merge(&mut self, incoming: Self) -> StoreResult<()> {
        self.value = checked_sum::<T>(self.value, incoming.value)?;
        Ok(())
    }
}

fn checked_sum<T: CoinType>(current: u64, incoming: u64) -> StoreResult<u64> {
    current
        .checked_add(incoming)
        .ok_or_else(|| StoreError::Overflow {
            tag: T::type_tag(),
            current,
            incoming,
        })
}

/// Merge `amount` into the `T` balance of `set`, creating it on first use.
///
/// Returns the balance after the merge.
pub fn deposit<T: CoinType>(set: &mut AttachmentSet, amount: Coin<T>) -> StoreResult<u64> {
    let balance = set.insert_or_merge(Balance::from(amount))?;
    Ok(balance.value())
}

/// The `T` balance held in `set`, or 0 if there is none.
pub fn balance_of<T: CoinType>(set: &AttachmentSet) -> u64 {
    set.value_of(&T::type_tag())
}

/// Whether `set` holds a `T` balance.
pub fn exists<T: CoinType>(set: &AttachmentSet) -> bool {
    set.contains_tag(&T::type_tag())
}
