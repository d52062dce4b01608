//! Property tests for registration and credential checks.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use laberator_accounts::{AccountDirectory, Error};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn register_makes_login_exist(login in "\\PC{0,24}", password in "\\PC{0,24}") {
        runtime().block_on(async {
            let directory = AccountDirectory::in_memory().await.unwrap();

            prop_assert!(!directory.exists(&login).await);
            directory.register(&login, &password).await.unwrap();
            prop_assert!(directory.exists(&login).await);
            prop_assert!(directory.validate(&login, &password).await);
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn wrong_password_never_validates(
        login in "[a-z]{1,12}",
        password in "\\PC{0,16}",
        wrong in "\\PC{0,16}",
    ) {
        prop_assume!(wrong != password);

        runtime().block_on(async {
            let directory = AccountDirectory::in_memory().await.unwrap();
            directory.register(&login, &password).await.unwrap();

            prop_assert!(!directory.validate(&login, &wrong).await);
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn unknown_login_never_validates(login in "[a-z]{1,12}", password in "\\PC{0,16}") {
        runtime().block_on(async {
            let directory = AccountDirectory::in_memory().await.unwrap();
            directory.register("someone-else", &password).await.unwrap();

            prop_assert!(!directory.validate(&login, &password).await);
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Random registration sequences agree with a first-writer-wins map.
    #[test]
    fn registrations_match_model(
        ops in prop::collection::vec(("[abc]", "[xyz]{1,2}"), 1..20),
        probes in prop::collection::vec(("[abcd]", "[xyz]{1,2}"), 1..10),
    ) {
        runtime().block_on(async {
            let directory = AccountDirectory::in_memory().await.unwrap();
            let mut model: HashMap<String, String> = HashMap::new();

            for (login, password) in &ops {
                let result = directory.register(login, password).await;
                if model.contains_key(login) {
                    prop_assert!(matches!(result, Err(Error::DuplicateLogin(_))));
                } else {
                    prop_assert!(result.is_ok());
                    model.insert(login.clone(), password.clone());
                }
            }

            for (login, password) in &probes {
                prop_assert_eq!(directory.exists(login).await, model.contains_key(login));
                prop_assert_eq!(
                    directory.validate(login, password).await,
                    model.get(login) == Some(password)
                );
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
