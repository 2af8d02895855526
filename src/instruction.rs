//! Instruction builders
//!
//! Each builder is pure (no I/O) and produces a `solana_sdk` `Instruction`:
//! a target account list with signer/writable flags, the owning program and
//! an opcode-specific payload.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_instruction;
use thiserror::Error;

/// Build a system transfer of `lamports` from one wallet to another.
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    system_instruction::transfer(from, to, lamports)
}

/// Build a system transfer denominated in SOL.
///
/// Rejects negative and non-finite amounts before anything touches the
/// network.
pub fn transfer_sol(
    from: &Pubkey,
    to: &Pubkey,
    amount_sol: f64,
) -> Result<Instruction, InstructionError> {
    if !amount_sol.is_finite() || amount_sol < 0.0 {
        return Err(InstructionError::InvalidAmount(amount_sol));
    }
    let lamports = (amount_sol * LAMPORTS_PER_SOL as f64) as u64;
    Ok(transfer(from, to, lamports))
}

/// Build a zero-payload invocation of a program ("ping"), targeting one
/// writable data account.
pub fn ping(program_id: &Pubkey, data_account: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new(*data_account, false)],
        data: Vec::new(),
    }
}

/// Calculator opcodes understood by the on-chain program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorOp {
    Reset,
    Add,
    Subtract,
    Multiply,
}

impl CalculatorOp {
    pub fn opcode(self) -> u32 {
        match self {
            CalculatorOp::Reset => 0,
            CalculatorOp::Add => 1,
            CalculatorOp::Subtract => 2,
            CalculatorOp::Multiply => 3,
        }
    }

    /// Human description of what the program will do.
    pub fn describe(self, value: u32) -> String {
        match self {
            CalculatorOp::Reset => "reset the value".to_string(),
            CalculatorOp::Add => format!("add: {value}"),
            CalculatorOp::Subtract => format!("subtract: {value}"),
            CalculatorOp::Multiply => format!("multiply by: {value}"),
        }
    }
}

/// Calculator instruction payload.
///
/// Encodes as two little-endian u32 fields, operation first. This ordering
/// is a wire contract with the on-chain program and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CalculatorOperation {
    pub operation: u32,
    pub operating_value: u32,
}

impl CalculatorOperation {
    /// Build a payload, rejecting operands outside the unsigned 32-bit range.
    pub fn new(op: CalculatorOp, operating_value: u64) -> Result<Self, InstructionError> {
        let operating_value = u32::try_from(operating_value)
            .map_err(|_| InstructionError::OperandOutOfRange(operating_value))?;
        Ok(Self {
            operation: op.opcode(),
            operating_value,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, InstructionError> {
        borsh::to_vec(self).map_err(|e| InstructionError::Encoding(e.to_string()))
    }

    pub fn decode(data: &[u8]) -> Result<Self, InstructionError> {
        Self::try_from_slice(data).map_err(|e| InstructionError::Encoding(e.to_string()))
    }
}

/// Build a calculator invocation carrying an opcode and operand.
pub fn calculator_operation(
    program_id: &Pubkey,
    data_account: &Pubkey,
    op: CalculatorOperation,
) -> Result<Instruction, InstructionError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new(*data_account, false)],
        data: op.encode()?,
    })
}

/// Instruction construction errors
#[derive(Error, Debug)]
pub enum InstructionError {
    #[error("transfer amount must be a non-negative finite number, got {0}")]
    InvalidAmount(f64),

    #[error("operand {0} exceeds the unsigned 32-bit range")]
    OperandOutOfRange(u64),

    #[error("payload encoding failed: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{Keypair, Signer};

    #[test]
    fn transfer_marks_sender_as_signer() {
        let from = Keypair::new().pubkey();
        let to = Keypair::new().pubkey();

        let ix = transfer(&from, &to, 100);
        assert_eq!(ix.program_id, solana_sdk::system_program::id());

        let sender = ix.accounts.iter().find(|m| m.pubkey == from).unwrap();
        assert!(sender.is_signer);
        assert!(sender.is_writable);
    }

    #[test]
    fn transfer_sol_converts_to_lamports() {
        let from = Keypair::new().pubkey();
        let to = Keypair::new().pubkey();

        let ix = transfer_sol(&from, &to, 1.5).unwrap();
        let expected = transfer(&from, &to, 1_500_000_000);
        assert_eq!(ix.data, expected.data);
    }

    #[test]
    fn negative_transfer_fails_before_any_io() {
        let from = Keypair::new().pubkey();
        let to = Keypair::new().pubkey();

        assert!(matches!(
            transfer_sol(&from, &to, -1.0),
            Err(InstructionError::InvalidAmount(_))
        ));
        assert!(matches!(
            transfer_sol(&from, &to, f64::NAN),
            Err(InstructionError::InvalidAmount(_))
        ));
    }

    #[test]
    fn ping_has_empty_payload_and_writable_target() {
        let program_id = Pubkey::new_unique();
        let data_account = Pubkey::new_unique();

        let ix = ping(&program_id, &data_account);
        assert!(ix.data.is_empty());
        assert_eq!(ix.accounts.len(), 1);
        assert_eq!(ix.accounts[0].pubkey, data_account);
        assert!(ix.accounts[0].is_writable);
        assert!(!ix.accounts[0].is_signer);
    }

    #[test]
    fn calculator_payload_is_two_le_u32s() {
        let op = CalculatorOperation::new(CalculatorOp::Add, 6).unwrap();
        let bytes = op.encode().unwrap();

        // Wire contract: [operation as u32 LE][operating_value as u32 LE].
        assert_eq!(bytes, vec![1, 0, 0, 0, 6, 0, 0, 0]);
    }

    #[test]
    fn calculator_payload_round_trips() {
        for (op, value) in [
            (CalculatorOp::Reset, 0u64),
            (CalculatorOp::Add, 6),
            (CalculatorOp::Subtract, 42),
            (CalculatorOp::Multiply, u32::MAX as u64),
        ] {
            let original = CalculatorOperation::new(op, value).unwrap();
            let decoded = CalculatorOperation::decode(&original.encode().unwrap()).unwrap();
            assert_eq!(decoded, original);
            assert_eq!(decoded.operation, op.opcode());
        }
    }

    #[test]
    fn oversized_operand_is_rejected() {
        let result = CalculatorOperation::new(CalculatorOp::Add, u32::MAX as u64 + 1);
        assert!(matches!(result, Err(InstructionError::OperandOutOfRange(_))));
    }

    #[test]
    fn calculator_instruction_targets_data_account() {
        let program_id = Pubkey::new_unique();
        let data_account = Pubkey::new_unique();
        let op = CalculatorOperation::new(CalculatorOp::Multiply, 3).unwrap();

        let ix = calculator_operation(&program_id, &data_account, op).unwrap();
        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.data.len(), 8);
        assert_eq!(ix.accounts[0].pubkey, data_account);
    }

    #[test]
    fn describe_matches_opcode() {
        assert_eq!(CalculatorOp::Add.describe(6), "add: 6");
        assert_eq!(CalculatorOp::Reset.describe(0), "reset the value");
    }
}
