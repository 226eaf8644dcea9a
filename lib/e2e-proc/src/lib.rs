//! Procedural macros for end-to-end tests.
use proc_macro::TokenStream;

mod test;

/// Defines an end-to-end contract test that injects freshly funded test
/// accounts for each of its arguments.
///
/// Every argument must be a plain binding whose type has an async
/// `new() -> eyre::Result<Self>` constructor, such as `e2e::Account`. The
/// test runs on a tokio runtime and must return a `Result`.
///
/// # Examples
///
/// ```rust,ignore
/// #[e2e::test]
/// async fn deploys(alice: Account) -> eyre::Result<()> {
///     let factory =
///         ContractFactory::from_artifacts(artifacts_dir()?, "Counter")?;
///     let deployment = alice.as_deployer().deploy(&factory).await?;
///     assert!(e2e::is_proper_address(&deployment.address.to_checksum(None)));
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, input: TokenStream) -> TokenStream {
    test::test(attr, input)
}
