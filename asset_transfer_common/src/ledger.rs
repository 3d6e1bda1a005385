//! The asset-transfer state transition
//!
//! Every operation reads what it needs, decides, and writes only on success.
//! Nothing is kept between calls; all state lives in the [`StateStore`].

use crate::command::Function;
use crate::errors::ChaincodeError;
use crate::response::{AccountHolding, Response};
use crate::store::StateStore;
use crate::validation::{non_empty, parse_integer};

pub const INIT_SUCCESSFUL: &str = "Init Successful";
pub const TRANSFER_SUCCESSFUL: &str = "Transfer successful";

/// **Validates and applies ledger operations against a state store**
#[derive(Debug)]
pub struct LedgerTransition<S> {
    store: S,
}

impl<S: StateStore> LedgerTransition<S> {
    pub fn new(store: S) -> Self {
        LedgerTransition { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// **Seeds two accounts**
    ///
    /// `args` are `[name_a, balance_a, name_b, balance_b]`. Both balances must
    /// parse before anything is written; they are then stored exactly as given.
    ///
    /// # Errors
    /// - Not exactly 4 arguments, `ChaincodeError::InvalidArgumentCount`;
    /// - Either balance isn't an integer, `ChaincodeError::InvalidBalanceFormat`.
    pub fn init(&mut self, args: &[String]) -> Result<Response, ChaincodeError> {
        if args.len() != 4 {
            return Err(ChaincodeError::InvalidArgumentCount(
                Function::Init,
                args.len(),
            ));
        }

        for balance in [&args[1], &args[3]] {
            if let Err(err) = parse_integer(balance) {
                log::warn!("init: balance '{}' is not an integer: {}", balance, err);
                return Err(ChaincodeError::InvalidBalanceFormat(None));
            }
        }

        self.store.put_state(&args[0], &args[1])?;
        self.store.put_state(&args[2], &args[3])?;

        Ok(Response::Success(INIT_SUCCESSFUL.to_string()))
    }

    /// **Moves `amount` from one account to another**
    ///
    /// `args` are `[from, to, amount]`. Checks run in this order, and the first
    /// one that fails is reported: the sender's account, the recipient's account,
    /// the amount, and finally the sender's funds.
    ///
    /// A negative amount is not rejected; it moves value the other way.
    /// Both new balances are computed from the values read up front and written
    /// sender first, so a transfer to oneself ends at the recipient's new balance.
    ///
    /// # Errors
    /// - Not exactly 3 arguments, `ChaincodeError::InvalidArgumentCount`;
    /// - Either account is missing or empty, `ChaincodeError::AccountNotFound`;
    /// - Either stored balance isn't an integer, `ChaincodeError::InvalidBalanceFormat`;
    /// - The amount isn't an integer, `ChaincodeError::InvalidAmountFormat`;
    /// - The amount exceeds the sender's balance, `ChaincodeError::InsufficientFunds`;
    /// - A new balance wouldn't fit into `i64`, `ChaincodeError::BalanceOverflow`.
    pub fn transfer(&mut self, args: &[String]) -> Result<Response, ChaincodeError> {
        if args.len() != 3 {
            log::warn!("Incorrect number of arguments: {}", args.len());
            return Err(ChaincodeError::InvalidArgumentCount(
                Function::Transfer,
                args.len(),
            ));
        }
        let (from, to, amount) = (&args[0], &args[1], &args[2]);

        let from_balance = self.balance_of(from)?;
        let to_balance = self.balance_of(to)?;

        let value = parse_integer(amount).map_err(|err| {
            log::warn!("transfer: amount '{}' is not an integer: {}", amount, err);
            ChaincodeError::InvalidAmountFormat
        })?;

        if value > from_balance {
            return Err(ChaincodeError::InsufficientFunds);
        }

        let new_from = from_balance
            .checked_sub(value)
            .ok_or_else(|| ChaincodeError::BalanceOverflow(from.to_string()))?;
        let new_to = to_balance
            .checked_add(value)
            .ok_or_else(|| ChaincodeError::BalanceOverflow(to.to_string()))?;

        log::info!(
            "Transfer {}>{} am='{}' new values='{}','{}'",
            from,
            to,
            amount,
            new_from,
            new_to
        );

        self.store.put_state(from, &new_from.to_string())?;
        self.store.put_state(to, &new_to.to_string())?;
        log::info!("Transfer complete");

        Ok(Response::Success(TRANSFER_SUCCESSFUL.to_string()))
    }

    /// **Reads one account's balance**
    ///
    /// The payload carries the balance exactly as stored.
    ///
    /// # Errors
    /// - Not exactly 1 argument, `ChaincodeError::InvalidArgumentCount`;
    /// - Account is missing or empty, `ChaincodeError::AccountNotFound`;
    /// - Stored balance isn't an integer, `ChaincodeError::InvalidBalanceFormat`.
    pub fn query(&self, args: &[String]) -> Result<Response, ChaincodeError> {
        if args.len() != 1 {
            return Err(ChaincodeError::InvalidArgumentCount(
                Function::Query,
                args.len(),
            ));
        }
        let name = &args[0];

        let amount = non_empty(self.store.get_state(name)?)
            .ok_or_else(|| ChaincodeError::AccountNotFound(name.to_string()))?;

        if let Err(err) = parse_integer(&amount) {
            log::warn!("query: holding of {} is not an integer: {}", name, err);
            return Err(ChaincodeError::InvalidBalanceFormat(None));
        }

        Ok(Response::Payload(AccountHolding {
            name: name.to_string(),
            amount,
        }))
    }

    /// **Writes raw key/value pairs**
    ///
    /// `args` are `[key, value, key, value, ...]`, stored verbatim and in order.
    ///
    /// # Errors
    /// - Odd number of arguments, `ChaincodeError::InvalidArgumentCount`;
    /// - The store fails, `ChaincodeError::State`; earlier pairs stay written.
    pub fn put(&mut self, args: &[String]) -> Result<Response, ChaincodeError> {
        if args.len() % 2 != 0 {
            return Err(ChaincodeError::InvalidArgumentCount(
                Function::Put,
                args.len(),
            ));
        }

        for pair in args.chunks(2) {
            self.store.put_state(&pair[0], &pair[1])?;
        }

        Ok(Response::Success(String::new()))
    }

    /// **Deletes keys in order**
    ///
    /// Missing keys are skipped silently.
    ///
    /// # Errors
    /// - The store fails, `ChaincodeError::State`.
    pub fn del(&mut self, args: &[String]) -> Result<Response, ChaincodeError> {
        for key in args {
            self.store.del_state(key)?;
        }

        Ok(Response::Success(String::new()))
    }

    fn balance_of(&self, name: &str) -> Result<i64, ChaincodeError> {
        let stored = non_empty(self.store.get_state(name)?)
            .ok_or_else(|| ChaincodeError::AccountNotFound(name.to_string()))?;

        parse_integer(&stored).map_err(|err| {
            log::warn!("Expecting integer value for asset holding of {}: {}", name, err);
            ChaincodeError::InvalidBalanceFormat(Some(name.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::store::MemoryStore;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn seeded() -> LedgerTransition<MemoryStore> {
        let mut ledger = LedgerTransition::new(MemoryStore::new());
        ledger.init(&args(&["alice", "100", "bob", "50"])).unwrap();
        ledger
    }

    fn stored(ledger: &LedgerTransition<MemoryStore>, key: &str) -> Option<String> {
        ledger.store().get_state(key).unwrap()
    }

    /// Accepts a fixed number of writes, then fails every write after that.
    struct FlakyStore {
        inner: MemoryStore,
        writes_left: usize,
    }

    impl StateStore for FlakyStore {
        fn get_state(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get_state(key)
        }

        fn put_state(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.writes_left == 0 {
                return Err(StoreError("write refused".to_string()));
            }
            self.writes_left -= 1;
            self.inner.put_state(key, value)
        }

        fn del_state(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.del_state(key)
        }
    }

    #[test]
    fn init_then_query() {
        let ledger = seeded();

        assert_eq!(
            Ok(Response::Payload(AccountHolding {
                name: "alice".to_string(),
                amount: "100".to_string(),
            })),
            ledger.query(&args(&["alice"]))
        );
        assert_eq!(
            Ok(Response::Payload(AccountHolding {
                name: "bob".to_string(),
                amount: "50".to_string(),
            })),
            ledger.query(&args(&["bob"]))
        );
    }

    #[test]
    fn init_returns_success_message() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());
        assert_eq!(
            Ok(Response::Success("Init Successful".to_string())),
            ledger.init(&args(&["alice", "100", "bob", "50"]))
        );
    }

    #[test]
    fn init_stores_values_verbatim() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());
        ledger.init(&args(&["alice", "+007", "bob", "-3"])).unwrap();

        assert_eq!(Some("+007".to_string()), stored(&ledger, "alice"));
        assert_eq!(Some("-3".to_string()), stored(&ledger, "bob"));
    }

    #[test]
    fn init_err_wrong_argument_count() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());

        assert_eq!(
            Err(ChaincodeError::InvalidArgumentCount(Function::Init, 3)),
            ledger.init(&args(&["alice", "100", "bob"]))
        );
        assert!(ledger.store().entries().is_empty());
    }

    #[test]
    fn init_err_second_balance_writes_nothing() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());

        assert_eq!(
            Err(ChaincodeError::InvalidBalanceFormat(None)),
            ledger.init(&args(&["alice", "100", "bob", "fifty"]))
        );
        assert!(ledger.store().entries().is_empty());
    }

    #[test]
    fn transfer_ok() {
        let mut ledger = seeded();

        assert_eq!(
            Ok(Response::Success("Transfer successful".to_string())),
            ledger.transfer(&args(&["alice", "bob", "30"]))
        );
        assert_eq!(Some("70".to_string()), stored(&ledger, "alice"));
        assert_eq!(Some("80".to_string()), stored(&ledger, "bob"));
    }

    #[test]
    fn transfer_conserves_total() {
        let mut ledger = seeded();

        for amount in ["0", "1", "17", "40"] {
            ledger.transfer(&args(&["alice", "bob", amount])).unwrap();
            let alice: i64 = stored(&ledger, "alice").unwrap().parse().unwrap();
            let bob: i64 = stored(&ledger, "bob").unwrap().parse().unwrap();
            assert_eq!(150, alice + bob);
        }
    }

    #[test]
    fn transfer_whole_balance_leaves_zero() {
        let mut ledger = seeded();

        assert!(ledger.transfer(&args(&["alice", "bob", "100"])).is_ok());
        assert_eq!(Some("0".to_string()), stored(&ledger, "alice"));
        assert_eq!(Some("150".to_string()), stored(&ledger, "bob"));
    }

    #[test]
    fn transfer_err_insufficient_funds_changes_nothing() {
        let mut ledger = seeded();

        let result = ledger.transfer(&args(&["alice", "bob", "1000"]));
        assert_eq!(Err(ChaincodeError::InsufficientFunds), result);
        assert!(result
            .unwrap_err()
            .to_json()
            .contains("Insufficient asset holding value"));

        assert_eq!(Some("100".to_string()), stored(&ledger, "alice"));
        assert_eq!(Some("50".to_string()), stored(&ledger, "bob"));
    }

    #[test]
    fn transfer_err_amount_not_integer() {
        let mut ledger = seeded();

        let result = ledger.transfer(&args(&["alice", "bob", "notanumber"]));
        assert_eq!(Err(ChaincodeError::InvalidAmountFormat), result);
        assert!(result
            .unwrap_err()
            .to_json()
            .contains("Expecting integer value for amount"));
    }

    #[test]
    fn transfer_err_wrong_argument_count() {
        let mut ledger = seeded();

        assert_eq!(
            Err(ChaincodeError::InvalidArgumentCount(Function::Transfer, 2)),
            ledger.transfer(&args(&["alice", "bob"]))
        );
        assert_eq!(
            Err(ChaincodeError::InvalidArgumentCount(Function::Transfer, 4)),
            ledger.transfer(&args(&["alice", "bob", "1", "2"]))
        );
    }

    #[test]
    fn transfer_err_sender_doesnt_exist() {
        let mut ledger = seeded();

        assert_eq!(
            Err(ChaincodeError::AccountNotFound("carol".to_string())),
            ledger.transfer(&args(&["carol", "bob", "10"]))
        );
        assert_eq!(Some("50".to_string()), stored(&ledger, "bob"));
    }

    #[test]
    fn transfer_err_recipient_doesnt_exist() {
        let mut ledger = seeded();

        assert_eq!(
            Err(ChaincodeError::AccountNotFound("carol".to_string())),
            ledger.transfer(&args(&["alice", "carol", "10"]))
        );
        assert_eq!(Some("100".to_string()), stored(&ledger, "alice"));
        assert_eq!(None, stored(&ledger, "carol"));
    }

    #[test]
    fn transfer_empty_value_counts_as_missing() {
        let mut ledger = seeded();
        ledger.store_mut().put_state("bob", "").unwrap();

        assert_eq!(
            Err(ChaincodeError::AccountNotFound("bob".to_string())),
            ledger.transfer(&args(&["alice", "bob", "10"]))
        );
    }

    #[test]
    fn transfer_err_stored_balance_not_integer() {
        let mut ledger = seeded();
        ledger.store_mut().put_state("bob", "lots").unwrap();

        assert_eq!(
            Err(ChaincodeError::InvalidBalanceFormat(Some("bob".to_string()))),
            ledger.transfer(&args(&["alice", "bob", "10"]))
        );
        assert_eq!(Some("100".to_string()), stored(&ledger, "alice"));
    }

    #[test]
    fn transfer_precedence_sender_before_recipient() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());

        // Neither exists: the sender is reported
        assert_eq!(
            Err(ChaincodeError::AccountNotFound("carol".to_string())),
            ledger.transfer(&args(&["carol", "dave", "x"]))
        );

        // Sender is malformed, recipient is missing: the sender is reported
        ledger.store_mut().put_state("carol", "abc").unwrap();
        assert_eq!(
            Err(ChaincodeError::InvalidBalanceFormat(Some("carol".to_string()))),
            ledger.transfer(&args(&["carol", "dave", "x"]))
        );
    }

    #[test]
    fn transfer_precedence_accounts_before_amount() {
        let mut ledger = seeded();

        assert_eq!(
            Err(ChaincodeError::AccountNotFound("dave".to_string())),
            ledger.transfer(&args(&["alice", "dave", "notanumber"]))
        );

        ledger.store_mut().put_state("bob", "lots").unwrap();
        assert_eq!(
            Err(ChaincodeError::InvalidBalanceFormat(Some("bob".to_string()))),
            ledger.transfer(&args(&["alice", "bob", "notanumber"]))
        );
    }

    #[test]
    fn transfer_precedence_amount_before_funds() {
        let mut ledger = seeded();
        ledger.store_mut().put_state("alice", "0").unwrap();

        assert_eq!(
            Err(ChaincodeError::InvalidAmountFormat),
            ledger.transfer(&args(&["alice", "bob", "1e9"]))
        );
    }

    #[test]
    fn transfer_negative_amount_moves_value_back() {
        let mut ledger = seeded();

        assert!(ledger.transfer(&args(&["alice", "bob", "-50"])).is_ok());
        assert_eq!(Some("150".to_string()), stored(&ledger, "alice"));
        assert_eq!(Some("0".to_string()), stored(&ledger, "bob"));
    }

    #[test]
    fn transfer_to_self_ends_at_recipient_balance() {
        let mut ledger = seeded();

        assert!(ledger.transfer(&args(&["alice", "alice", "30"])).is_ok());
        assert_eq!(Some("130".to_string()), stored(&ledger, "alice"));
        assert_eq!(Some("50".to_string()), stored(&ledger, "bob"));

        assert_eq!(
            Err(ChaincodeError::InsufficientFunds),
            ledger.transfer(&args(&["alice", "alice", "101"]))
        );
    }

    #[test]
    fn transfer_err_recipient_overflow() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());
        let max = i64::MAX.to_string();
        ledger.init(&args(&["alice", "100", "bob", max.as_str()])).unwrap();

        assert_eq!(
            Err(ChaincodeError::BalanceOverflow("bob".to_string())),
            ledger.transfer(&args(&["alice", "bob", "10"]))
        );
        assert_eq!(Some("100".to_string()), stored(&ledger, "alice"));
        assert_eq!(Some(max), stored(&ledger, "bob"));
    }

    #[test]
    fn transfer_err_sender_overflow() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());
        let max = i64::MAX.to_string();
        ledger.init(&args(&["alice", max.as_str(), "bob", "0"])).unwrap();

        assert_eq!(
            Err(ChaincodeError::BalanceOverflow("alice".to_string())),
            ledger.transfer(&args(&["alice", "bob", "-1"]))
        );
    }

    #[test]
    fn transfer_store_failure_after_first_write() {
        let mut inner = MemoryStore::new();
        inner.put_state("alice", "100").unwrap();
        inner.put_state("bob", "50").unwrap();
        let mut ledger = LedgerTransition::new(FlakyStore {
            inner,
            writes_left: 1,
        });

        assert_eq!(
            Err(ChaincodeError::State(StoreError("write refused".to_string()))),
            ledger.transfer(&args(&["alice", "bob", "30"]))
        );

        // The two writes aren't linked; the first one stays
        let store = ledger.into_store();
        assert_eq!(Some("70".to_string()), store.get_state("alice").unwrap());
        assert_eq!(Some("50".to_string()), store.get_state("bob").unwrap());
    }

    #[test]
    fn query_is_idempotent() {
        let ledger = seeded();

        let first = ledger.query(&args(&["alice"]));
        let second = ledger.query(&args(&["alice"]));
        assert_eq!(first, second);
    }

    #[test]
    fn query_err_doesnt_exist() {
        let ledger = seeded();

        let result = ledger.query(&args(&["carol"]));
        assert_eq!(
            Err(ChaincodeError::AccountNotFound("carol".to_string())),
            result
        );
        assert!(result
            .unwrap_err()
            .to_json()
            .contains("Failed to get state for carol"));
    }

    #[test]
    fn query_err_not_integer() {
        let mut ledger = seeded();
        ledger.store_mut().put_state("alice", "lots").unwrap();

        assert_eq!(
            Err(ChaincodeError::InvalidBalanceFormat(None)),
            ledger.query(&args(&["alice"]))
        );
    }

    #[test]
    fn query_err_wrong_argument_count() {
        let ledger = seeded();

        assert_eq!(
            Err(ChaincodeError::InvalidArgumentCount(Function::Query, 0)),
            ledger.query(&[])
        );
        assert_eq!(
            Err(ChaincodeError::InvalidArgumentCount(Function::Query, 2)),
            ledger.query(&args(&["alice", "bob"]))
        );
    }

    #[test]
    fn put_writes_pairs_verbatim() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());

        assert_eq!(
            Ok(Response::Success(String::new())),
            ledger.put(&args(&["alice", "not a number", "bob", "7"]))
        );
        assert_eq!(Some("not a number".to_string()), stored(&ledger, "alice"));
        assert_eq!(Some("7".to_string()), stored(&ledger, "bob"));
    }

    #[test]
    fn put_later_pair_wins() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());

        ledger.put(&args(&["alice", "1", "alice", "2"])).unwrap();
        assert_eq!(Some("2".to_string()), stored(&ledger, "alice"));
    }

    #[test]
    fn put_err_odd_argument_count_writes_nothing() {
        let mut ledger = LedgerTransition::new(MemoryStore::new());

        assert_eq!(
            Err(ChaincodeError::InvalidArgumentCount(Function::Put, 3)),
            ledger.put(&args(&["alice", "1", "bob"]))
        );
        assert!(ledger.store().entries().is_empty());
    }

    #[test]
    fn put_store_failure_is_propagated() {
        let mut ledger = LedgerTransition::new(FlakyStore {
            inner: MemoryStore::new(),
            writes_left: 1,
        });

        let result = ledger.put(&args(&["a", "1", "b", "2"]));
        assert!(matches!(result, Err(ChaincodeError::State(_))));

        let store = ledger.into_store();
        assert_eq!(Some("1".to_string()), store.get_state("a").unwrap());
        assert_eq!(None, store.get_state("b").unwrap());
    }

    #[test]
    fn del_removes_keys_and_ignores_missing() {
        let mut ledger = seeded();

        assert_eq!(
            Ok(Response::Success(String::new())),
            ledger.del(&args(&["alice", "nobody"]))
        );
        assert_eq!(None, stored(&ledger, "alice"));
        assert_eq!(Some("50".to_string()), stored(&ledger, "bob"));

        assert_eq!(
            Err(ChaincodeError::AccountNotFound("alice".to_string())),
            ledger.query(&args(&["alice"]))
        );
    }
}
