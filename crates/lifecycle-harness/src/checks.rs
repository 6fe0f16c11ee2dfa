//! Assertion surface: the named, re-runnable lifecycle checks.
//!
//! Each check resolves its step through the sequencer (forcing pending
//! predecessors), then applies its predicate to every variant's response.
//! One failing variant fails the whole check. Checks governed by a disabled
//! capability return `Ok(())` without touching the sequencer, so a test
//! runner can invoke the full check set against any subject.

use crate::error::{HarnessError, Result};
use crate::response::ApiResponse;
use crate::sequencer::{LifecycleSequencer, LifecycleStep};

fn expect_valid(response: &dyn ApiResponse) -> std::result::Result<(), String> {
    if response.is_valid() {
        Ok(())
    } else {
        Err(format!("expected a valid response, got {:?}", response))
    }
}

fn expect_not_valid(response: &dyn ApiResponse) -> std::result::Result<(), String> {
    if response.is_valid() {
        Err(format!("expected an invalid response, got {:?}", response))
    } else {
        Ok(())
    }
}

impl LifecycleSequencer {
    /// Resolve `step` and apply a typed predicate to every variant's
    /// response.
    ///
    /// A stored response that is not an `R` is a configuration error and
    /// aborts the check; a predicate `Err` fails the check for that
    /// variant.
    pub async fn assert_on_all<R, F>(&self, step: LifecycleStep, assert: F) -> Result<()>
    where
        R: ApiResponse,
        F: Fn(&R) -> std::result::Result<(), String>,
    {
        let responses = self.resolve_through(&step).await?;
        for (variant, outcome) in responses.iter() {
            let response = match outcome {
                Ok(response) => response,
                Err(failure) => {
                    return Err(HarnessError::Dispatch {
                        step: step.clone(),
                        variant: *variant,
                        message: failure.message.clone(),
                    })
                }
            };
            let typed = response.as_any().downcast_ref::<R>().ok_or_else(|| {
                HarnessError::ResponseTypeMismatch {
                    step: step.clone(),
                    variant: *variant,
                    expected: std::any::type_name::<R>(),
                    actual: format!("{:?}", response),
                }
            })?;
            assert(typed).map_err(|message| HarnessError::Assertion {
                step: step.clone(),
                variant: *variant,
                message,
            })?;
        }
        Ok(())
    }

    /// Resolve `step` and apply an untyped predicate to every variant.
    async fn assert_each(
        &self,
        step: LifecycleStep,
        assert: impl Fn(&dyn ApiResponse) -> std::result::Result<(), String>,
    ) -> Result<()> {
        let responses = self.resolve_through(&step).await?;
        for (variant, outcome) in responses.iter() {
            let response = match outcome {
                Ok(response) => response,
                Err(failure) => {
                    return Err(HarnessError::Dispatch {
                        step: step.clone(),
                        variant: *variant,
                        message: failure.message.clone(),
                    })
                }
            };
            assert(response.as_ref()).map_err(|message| HarnessError::Assertion {
                step: step.clone(),
                variant: *variant,
                message,
            })?;
        }
        Ok(())
    }

    /// Existence check: every variant must be valid and report the
    /// expected existence flag. A response without an existence flag is a
    /// configuration error.
    async fn assert_exists(&self, step: LifecycleStep, expected: bool) -> Result<()> {
        let responses = self.resolve_through(&step).await?;
        for (variant, outcome) in responses.iter() {
            let response = match outcome {
                Ok(response) => response,
                Err(failure) => {
                    return Err(HarnessError::Dispatch {
                        step: step.clone(),
                        variant: *variant,
                        message: failure.message.clone(),
                    })
                }
            };
            expect_valid(response.as_ref()).map_err(|message| HarnessError::Assertion {
                step: step.clone(),
                variant: *variant,
                message,
            })?;
            match response.exists() {
                Some(actual) if actual == expected => {}
                Some(actual) => {
                    return Err(HarnessError::Assertion {
                        step: step.clone(),
                        variant: *variant,
                        message: format!("expected exists = {}, got {}", expected, actual),
                    })
                }
                None => {
                    return Err(HarnessError::ResponseTypeMismatch {
                        step: step.clone(),
                        variant: *variant,
                        expected: "a response carrying an existence flag",
                        actual: format!("{:?}", response),
                    })
                }
            }
        }
        Ok(())
    }

    /// The create call succeeded on every variant.
    pub async fn create_call_is_valid(&self) -> Result<()> {
        self.assert_each(LifecycleStep::Create, expect_valid).await
    }

    /// The created resource reads back successfully.
    pub async fn get_after_create_is_valid(&self) -> Result<()> {
        self.assert_each(LifecycleStep::ReadAfterCreate, expect_valid)
            .await
    }

    /// The created resource exists.
    pub async fn exists_after_create_is_valid(&self) -> Result<()> {
        if !self.capabilities().supports_exists {
            return Ok(());
        }
        self.assert_exists(LifecycleStep::ExistsAfterCreate, true)
            .await
    }

    /// The update call succeeded on every variant.
    pub async fn update_call_is_valid(&self) -> Result<()> {
        if !self.capabilities().supports_updates {
            return Ok(());
        }
        self.assert_each(LifecycleStep::Update, expect_valid).await
    }

    /// The updated resource reads back successfully.
    pub async fn get_after_update_is_valid(&self) -> Result<()> {
        if !self.capabilities().supports_updates {
            return Ok(());
        }
        self.assert_each(LifecycleStep::ReadAfterUpdate, expect_valid)
            .await
    }

    /// The delete call succeeded on every variant.
    pub async fn delete_call_is_valid(&self) -> Result<()> {
        if !self.capabilities().supports_deletes {
            return Ok(());
        }
        self.assert_each(LifecycleStep::Delete, expect_valid).await
    }

    /// Reading the deleted resource fails on every variant.
    pub async fn get_after_delete_is_valid(&self) -> Result<()> {
        if !self.capabilities().supports_deletes {
            return Ok(());
        }
        self.assert_each(LifecycleStep::ReadAfterDelete, expect_not_valid)
            .await
    }

    /// The deleted resource no longer exists.
    pub async fn exists_after_delete_is_valid(&self) -> Result<()> {
        let caps = self.capabilities();
        if !caps.supports_deletes || !caps.supports_exists {
            return Ok(());
        }
        self.assert_exists(LifecycleStep::ExistsAfterDelete, false)
            .await
    }

    /// Deleting the already-deleted resource reports not-found.
    pub async fn delete_not_found_is_not_valid(&self) -> Result<()> {
        if !self.capabilities().supports_deletes {
            return Ok(());
        }
        self.assert_each(LifecycleStep::DeleteNotFound, expect_not_valid)
            .await
    }

    /// Apply a typed predicate to a named after-create call's responses.
    ///
    /// Fails with a configuration error naming the key if it was never
    /// registered.
    pub async fn assert_on_after_create<R, F>(&self, key: &str, assert: F) -> Result<()>
    where
        R: ApiResponse,
        F: Fn(&R) -> std::result::Result<(), String>,
    {
        if !self.has_after_create(key) {
            return Err(HarnessError::UnknownAfterCreateKey {
                key: key.to_owned(),
            });
        }
        self.assert_on_all(LifecycleStep::AfterCreate(key.to_owned()), assert)
            .await
    }
}
