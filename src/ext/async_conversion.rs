/// Fallible conversion that needs to await, typically because it reads from
/// disk first.
pub trait AsyncTryFrom<T>: Sized {
    type Error;

    async fn async_try_from(value: T) -> Result<Self, Self::Error>;
}

/// Counterpart of [`AsyncTryFrom`], implemented for every `T` that some `U`
/// can be converted from.
pub trait AsyncTryInto<T> {
    type Error;

    async fn async_try_into(self) -> Result<T, Self::Error>;
}

impl<T, U> AsyncTryInto<U> for T
where
    U: AsyncTryFrom<T>,
{
    type Error = U::Error;

    async fn async_try_into(self) -> Result<U, Self::Error> {
        U::async_try_from(self).await
    }
}
