use crate::{event::EventType, outcome::ContractError};

const EVENT_TYPE_FILTER: &str = "[Optional('deposit'|'remit'|'withdraw')]";

/// Every operation the contract exposes, with its arguments already
/// checked for count and shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListAccounts,
    CreateAccount {
        name: String,
    },
    RetrieveAccount {
        no: String,
    },
    UpdateAccountName {
        no: String,
        name: String,
    },
    DeleteAccount {
        no: String,
    },
    ListEvents {
        event_type: Option<EventType>,
    },
    Deposit {
        to_no: String,
        amount: String,
    },
    Remit {
        from_no: String,
        to_no: String,
        amount: String,
    },
    Withdraw {
        from_no: String,
        amount: String,
    },
    ListHistory {
        no: String,
    },
}

impl Command {
    pub fn parse(function: &str, args: &[String]) -> Result<Self, ContractError> {
        match function {
            "listAccount" | "listAccounts" => {
                let []: [String; 0] = expect_args(args, "no argument")?;
                Ok(Self::ListAccounts)
            }
            "createAccount" => {
                let [name]: [String; 1] = expect_args(args, "['name']")?;
                Ok(Self::CreateAccount { name })
            }
            "retrieveAccount" => {
                let [no]: [String; 1] = expect_args(args, "['no']")?;
                Ok(Self::RetrieveAccount { no })
            }
            "updateAccountName" => {
                let [no, name]: [String; 2] = expect_args(args, "['no', 'name']")?;
                Ok(Self::UpdateAccountName { no, name })
            }
            "deleteAccount" => {
                let [no]: [String; 1] = expect_args(args, "['no']")?;
                Ok(Self::DeleteAccount { no })
            }
            "listEvent" | "listEvents" => Self::parse_list_events(args),
            "deposit" => {
                let [to_no, amount]: [String; 2] =
                    expect_args(args, "['to_account_no', 'amount']")?;
                Ok(Self::Deposit { to_no, amount })
            }
            "remit" => {
                let [from_no, to_no, amount]: [String; 3] =
                    expect_args(args, "['from_account_no', 'to_account_no', 'amount']")?;
                Ok(Self::Remit {
                    from_no,
                    to_no,
                    amount,
                })
            }
            "withdraw" => {
                let [from_no, amount]: [String; 2] =
                    expect_args(args, "['from_account_no', 'amount']")?;
                Ok(Self::Withdraw { from_no, amount })
            }
            "listHistory" => {
                let [no]: [String; 1] = expect_args(args, "['no']")?;
                Ok(Self::ListHistory { no })
            }
            _ => Err(ContractError::UnknownFunction {
                function: function.to_owned(),
                args: args.to_vec(),
            }),
        }
    }

    fn parse_list_events(args: &[String]) -> Result<Self, ContractError> {
        match args {
            [] => Ok(Self::ListEvents { event_type: None }),
            [filter] => match filter.parse() {
                Ok(event_type) => Ok(Self::ListEvents {
                    event_type: Some(event_type),
                }),
                Err(_) => Err(ContractError::InvalidArgument {
                    expected: EVENT_TYPE_FILTER,
                    actual: args.to_vec(),
                }),
            },
            _ => Err(ContractError::ArgumentCount {
                expected: EVENT_TYPE_FILTER,
                actual: args.to_vec(),
            }),
        }
    }
}

fn expect_args<const N: usize>(
    args: &[String],
    expected: &'static str,
) -> Result<[String; N], ContractError> {
    <[String; N]>::try_from(args.to_vec()).map_err(|actual| ContractError::ArgumentCount {
        expected,
        actual,
    })
}
