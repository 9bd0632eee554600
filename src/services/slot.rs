use async_trait::async_trait;

/// A storage location holding at most one current artifact. Writing a new
/// one supersedes the previous occupant. The firmware slot (filesystem) and
/// the sensor location record (database) both follow this contract.
#[async_trait]
pub trait SingleSlotStore {
    type Item;
    type Stored;
    type Error;

    /// Replace whatever the slot holds with `item`. Once this returns Ok
    /// the previous occupant is gone.
    async fn replace(&self, item: Self::Item) -> Result<Self::Stored, Self::Error>;

    /// The current occupant, if any.
    async fn current(&self) -> Result<Option<Self::Stored>, Self::Error>;

    /// Empty the slot.
    async fn clear(&self) -> Result<(), Self::Error>;
}
