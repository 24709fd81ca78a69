#![cfg_attr(not(feature = "std"), no_std, no_main)]

#[ink::contract]
mod edch {
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    /// Issuance cap of the EDCH deployment: 100 million tokens at 18 decimals.
    pub const EDCH_CAP: Balance = 100_000_000_000_000_000_000_000_000;
    pub const EDCH_NAME: &str = "EdChess Game";
    pub const EDCH_SYMBOL: &str = "EDCH";
    pub const EDCH_DECIMALS: u8 = 18;

    pub type Result<T> = core::result::Result<T, Error>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[ink::scale_derive(Encode, Decode, TypeInfo)]
    pub enum Error {
        /// Caller is not the current owner.
        Unauthorized,
        /// Mint would push total supply above the cap, or overflow `Balance`.
        CapExceeded,
        /// Caller holds less than the requested amount.
        InsufficientBalance,
    }

    /// Balance movement. `from_acc == None` is issuance, `to_acc == None` is a burn.
    #[ink(event)]
    pub struct Transferred {
        #[ink(topic)]
        from_acc: Option<AccountId>,
        #[ink(topic)]
        to_acc: Option<AccountId>,
        amount_val: Balance,
    }

    #[ink(event)]
    pub struct OwnershipTransferred {
        #[ink(topic)]
        previous_owner: Option<AccountId>,
        #[ink(topic)]
        new_owner: AccountId,
    }

    #[ink(storage)]
    pub struct Edch {
        // governance / control
        owner_acc: AccountId,

        // token state
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,

        // fixed at instantiation
        cap: Balance,
        name: String,
        symbol: String,
        decimals: u8,
    }

    impl Edch {
        // -------- constructors --------

        /// The EdChess Game token, owned by the deployer.
        #[ink(constructor)]
        pub fn new() -> Self {
            Self::with_config(
                EDCH_CAP,
                String::from(EDCH_NAME),
                String::from(EDCH_SYMBOL),
                EDCH_DECIMALS,
            )
        }

        #[ink(constructor)]
        pub fn with_config(cap: Balance, name: String, symbol: String, decimals: u8) -> Self {
            let owner_acc = Self::env().caller();
            Self::env().emit_event(OwnershipTransferred {
                previous_owner: None,
                new_owner: owner_acc,
            });
            Self {
                owner_acc,
                total_supply: 0,
                balances: Mapping::default(),
                cap,
                name,
                symbol,
                decimals,
            }
        }

        // -------- modifiers (helpers) --------

        fn only_owner(&self) -> Result<()> {
            if self.env().caller() != self.owner_acc {
                ink::env::debug_println!("rejected: caller is not the owner");
                return Err(Error::Unauthorized)
            }
            Ok(())
        }

        // -------- read API --------

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn cap(&self) -> Balance {
            self.cap
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Balance {
            self.balances.get(&owner_acc).unwrap_or(0)
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner_acc
        }

        /// Same as [`Edch::owner`], kept for clients of the BEP-20 style interface.
        #[ink(message)]
        pub fn get_owner(&self) -> AccountId {
            self.owner_acc
        }

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.decimals
        }

        // -------- write API --------

        /// Owner-only issuance of `amount_val` new tokens to `to_acc`.
        ///
        /// Minting up to exactly the cap succeeds; one unit more fails with
        /// [`Error::CapExceeded`].
        #[ink(message)]
        pub fn mint(&mut self, amount_val: Balance, to_acc: AccountId) -> Result<()> {
            self.only_owner()?;
            let new_total = match self.total_supply.checked_add(amount_val) {
                Some(total) if total <= self.cap => total,
                _ => {
                    ink::env::debug_println!(
                        "mint rejected: {} + {} exceeds cap {}",
                        self.total_supply,
                        amount_val,
                        self.cap
                    );
                    return Err(Error::CapExceeded)
                }
            };

            // cannot overflow: every balance is bounded by new_total
            let to_bal = self.balance_of(to_acc);
            self.balances.insert(&to_acc, &(to_bal + amount_val));
            self.total_supply = new_total;

            self.env().emit_event(Transferred {
                from_acc: None,
                to_acc: Some(to_acc),
                amount_val,
            });
            Ok(())
        }

        /// Destroy `amount_val` of the caller's own tokens. Open to any holder.
        #[ink(message)]
        pub fn burn(&mut self, amount_val: Balance) -> Result<()> {
            let from_acc = self.env().caller();
            self.debit(from_acc, amount_val)?;
            // debit succeeded, so amount_val <= old balance <= total_supply
            self.total_supply -= amount_val;

            self.env().emit_event(Transferred {
                from_acc: Some(from_acc),
                to_acc: None,
                amount_val,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount_val: Balance) -> Result<()> {
            let from_acc = self.env().caller();
            self.debit(from_acc, amount_val)?;
            // cannot overflow: sum of balances is total_supply
            let to_bal = self.balance_of(to_acc);
            self.balances.insert(&to_acc, &(to_bal + amount_val));

            self.env().emit_event(Transferred {
                from_acc: Some(from_acc),
                to_acc: Some(to_acc),
                amount_val,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<()> {
            self.only_owner()?;
            let previous_owner = self.owner_acc;
            self.owner_acc = new_owner;
            self.env().emit_event(OwnershipTransferred {
                previous_owner: Some(previous_owner),
                new_owner,
            });
            Ok(())
        }

        // ---- internals ----

        fn debit(&mut self, from_acc: AccountId, amount_val: Balance) -> Result<()> {
            let from_bal = self.balance_of(from_acc);
            if from_bal < amount_val {
                ink::env::debug_println!(
                    "rejected: balance {} is below requested {}",
                    from_bal,
                    amount_val
                );
                return Err(Error::InsufficientBalance)
            }
            self.balances.insert(&from_acc, &(from_bal - amount_val));
            Ok(())
        }
    }


    #[cfg(all(test, feature = "e2e-tests"))]
    mod e2e_tests {
        use super::*;
        use ink_e2e::ContractsBackend;

        type E2EResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

        #[ink_e2e::test]
        async fn deployment_sets_owner_and_metadata<Client: E2EBackend>(
            mut client: Client,
        ) -> E2EResult<()> {
            let mut constructor = EdchRef::new();
            let contract = client
                .instantiate("edch", &ink_e2e::alice(), &mut constructor)
                .submit()
                .await
                .expect("instantiate failed");
            let call_builder = contract.call_builder::<Edch>();

            let owner = client.call(&ink_e2e::bob(), &call_builder.owner()).dry_run().await?;
            assert_eq!(owner.return_value(), ink_e2e::account_id(ink_e2e::AccountKeyring::Alice));

            let cap = client.call(&ink_e2e::bob(), &call_builder.cap()).dry_run().await?;
            assert_eq!(cap.return_value(), EDCH_CAP);

            let supply = client
                .call(&ink_e2e::bob(), &call_builder.total_supply())
                .dry_run()
                .await?;
            assert_eq!(supply.return_value(), 0);

            let symbol = client.call(&ink_e2e::bob(), &call_builder.symbol()).dry_run().await?;
            assert_eq!(symbol.return_value(), "EDCH");
            Ok(())
        }

        #[ink_e2e::test]
        async fn only_owner_mints_up_to_cap<Client: E2EBackend>(
            mut client: Client,
        ) -> E2EResult<()> {
            let mut constructor = EdchRef::new();
            let contract = client
                .instantiate("edch", &ink_e2e::alice(), &mut constructor)
                .submit()
                .await
                .expect("instantiate failed");
            let mut call_builder = contract.call_builder::<Edch>();
            let bob_acc = ink_e2e::account_id(ink_e2e::AccountKeyring::Bob);

            let mint = call_builder.mint(10_000, bob_acc);
            let rejected = client.call(&ink_e2e::bob(), &mint).submit().await;
            assert!(rejected.is_err(), "non-owner mint must fail");

            client
                .call(&ink_e2e::alice(), &mint)
                .submit()
                .await
                .expect("owner mint failed");
            let balance = client
                .call(&ink_e2e::alice(), &call_builder.balance_of(bob_acc))
                .dry_run()
                .await?;
            assert_eq!(balance.return_value(), 10_000);

            let over_cap = call_builder.mint(EDCH_CAP, bob_acc);
            let rejected = client.call(&ink_e2e::alice(), &over_cap).submit().await;
            assert!(rejected.is_err(), "mint above cap must fail");

            let burn = call_builder.burn(4_000);
            client
                .call(&ink_e2e::bob(), &burn)
                .submit()
                .await
                .expect("holder burn failed");
            let supply = client
                .call(&ink_e2e::alice(), &call_builder.total_supply())
                .dry_run()
                .await?;
            assert_eq!(supply.return_value(), 6_000);
            Ok(())
        }
    }
}
