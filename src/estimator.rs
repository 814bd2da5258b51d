//! Compute-budget estimation via transaction simulation
//!
//! Transaction fees scale with the declared compute-unit limit, so the
//! workshop scripts measure the real cost of a draft instruction sequence
//! before submitting it: dry-run the sequence against current cluster state
//! and read back the consumed units.
//!
//! The one subtlety is the limit instruction itself. Simulating with a
//! guessed (too low) limit can fail before any measurement is taken, so the
//! draft's set-compute-unit-limit instruction is swapped for the protocol
//! ceiling during simulation - replaced in place when present, inserted at
//! the front when not. The caller then rebuilds the real transaction with
//! the measured value.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::config::RpcSimulateTransactionConfig;
use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount,
    commitment_config::CommitmentConfig,
    compute_budget::{self, ComputeBudgetInstruction},
    hash::Hash,
    instruction::Instruction,
    message::{v0, CompileError, VersionedMessage},
    pubkey::Pubkey,
    signature::Signature,
    transaction::{TransactionError, VersionedTransaction},
};
use thiserror::Error;
use tracing::debug;

/// Maximum compute units a transaction may request from the cluster.
pub const MAX_COMPUTE_UNITS: u32 = 1_400_000;

/// Leading opcode byte of a SetComputeUnitLimit instruction.
const SET_COMPUTE_UNIT_LIMIT_OPCODE: u8 = 2;

/// Errors raised while measuring compute units
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// The dry run executed and failed on-chain logic; the message carries
    /// the program logs and the structured error so the caller sees *why*.
    #[error("Transaction simulation failed:\n  • {logs}\n{reason}")]
    Simulation { reason: String, logs: String },

    /// The draft sequence could not be compiled into a message
    #[error("Failed to compile simulation message: {0}")]
    Compile(#[from] CompileError),

    /// Transport-level failure of the simulation request
    #[error("Simulation request failed: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),
}

/// Outcome of a successful dry run.
///
/// `Unknown` is distinct from a reading of zero: it means the node omitted
/// the consumed-units field, not that execution was free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedUnits {
    /// Units consumed, exactly as reported (padding is the caller's job)
    Consumed(u64),
    /// The node did not report a consumed-units count
    Unknown,
}

impl SimulatedUnits {
    /// The measured count, if the node reported one.
    pub fn consumed(self) -> Option<u64> {
        match self {
            SimulatedUnits::Consumed(units) => Some(units),
            SimulatedUnits::Unknown => None,
        }
    }
}

/// Build the real limit instruction from a measured unit count.
///
/// Counts above the protocol ceiling are clamped to it; the cluster would
/// reject a larger request anyway.
pub fn limit_instruction(units: u64) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_limit(
        u32::try_from(units).unwrap_or(MAX_COMPUTE_UNITS).min(MAX_COMPUTE_UNITS),
    )
}

/// Check if an instruction is a SetComputeUnitLimit instruction,
/// matched by program identity and leading opcode byte.
pub fn is_set_compute_unit_limit(instruction: &Instruction) -> bool {
    instruction.program_id == compute_budget::id()
        && instruction.data.first() == Some(&SET_COMPUTE_UNIT_LIMIT_OPCODE)
}

/// Copy the draft sequence with its compute limit raised to the ceiling.
///
/// An existing limit instruction is replaced in place; otherwise a new one
/// is inserted at position 0. Everything else keeps its position.
fn with_ceiling_limit(instructions: &[Instruction]) -> Vec<Instruction> {
    let mut simulation_instructions = instructions.to_vec();
    let ceiling = ComputeBudgetInstruction::set_compute_unit_limit(MAX_COMPUTE_UNITS);

    match simulation_instructions
        .iter()
        .position(is_set_compute_unit_limit)
    {
        Some(index) => simulation_instructions[index] = ceiling,
        None => simulation_instructions.insert(0, ceiling),
    }

    simulation_instructions
}

/// Measure the compute units a draft instruction sequence would consume.
///
/// The sequence is simulated as an unsigned v0 transaction with the limit
/// raised to [`MAX_COMPUTE_UNITS`]; the blockhash is a placeholder because
/// the node is asked to substitute a valid one server-side. Nothing is
/// committed to the ledger.
///
/// # Errors
///
/// Returns [`EstimatorError::Simulation`] when the dry run reports an
/// execution error, with the joined log lines in the message.
pub async fn get_simulation_compute_units(
    rpc: &RpcClient,
    instructions: &[Instruction],
    payer: &Pubkey,
    lookup_tables: &[AddressLookupTableAccount],
    commitment: CommitmentConfig,
) -> Result<SimulatedUnits, EstimatorError> {
    let simulation_instructions = with_ceiling_limit(instructions);

    let message = v0::Message::try_compile(
        payer,
        &simulation_instructions,
        lookup_tables,
        Hash::default(),
    )?;
    let signature_count = message.header.num_required_signatures as usize;
    let transaction = VersionedTransaction {
        signatures: vec![Signature::default(); signature_count],
        message: VersionedMessage::V0(message),
    };

    let response = rpc
        .simulate_transaction_with_config(
            &transaction,
            RpcSimulateTransactionConfig {
                sig_verify: false,
                replace_recent_blockhash: true,
                commitment: Some(commitment),
                ..RpcSimulateTransactionConfig::default()
            },
        )
        .await?;

    let result = response.value;
    if let Some(err) = result.err {
        return Err(simulation_failure(&err, result.logs.as_deref()));
    }

    match result.units_consumed {
        Some(units) => {
            debug!(units = units, "Simulation reported consumed units");
            Ok(SimulatedUnits::Consumed(units))
        }
        None => {
            debug!("Simulation response omitted the consumed-units field");
            Ok(SimulatedUnits::Unknown)
        }
    }
}

/// Build the diagnostic error for a failed dry run.
fn simulation_failure(err: &TransactionError, logs: Option<&[String]>) -> EstimatorError {
    let logs = match logs {
        Some(lines) if !lines.is_empty() => lines.join("\n  • "),
        _ => "No logs available".to_string(),
    };
    EstimatorError::Simulation {
        reason: format!("{:?}", err),
        logs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use solana_sdk::instruction::AccountMeta;

    fn dummy_instruction() -> Instruction {
        Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[1, 2, 3, 4],
            vec![AccountMeta::new(Pubkey::new_unique(), false)],
        )
    }

    fn limit_units(instruction: &Instruction) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&instruction.data[1..5]);
        u32::from_le_bytes(bytes)
    }

    #[test]
    fn test_limit_instruction_matching() {
        assert!(is_set_compute_unit_limit(
            &ComputeBudgetInstruction::set_compute_unit_limit(50_000)
        ));

        // Other compute-budget variants must not match
        assert!(!is_set_compute_unit_limit(
            &ComputeBudgetInstruction::set_compute_unit_price(10_000)
        ));
        assert!(!is_set_compute_unit_limit(
            &ComputeBudgetInstruction::set_loaded_accounts_data_size_limit(32 * 1024)
        ));
        assert!(!is_set_compute_unit_limit(
            &ComputeBudgetInstruction::request_heap_frame(64 * 1024)
        ));

        // Same opcode under a different program must not match
        assert!(!is_set_compute_unit_limit(&Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[2, 0, 0, 0, 0],
            vec![],
        )));
    }

    #[test]
    fn test_ceiling_inserted_at_front_when_absent() {
        let instructions = vec![dummy_instruction(), dummy_instruction()];

        let prepared = with_ceiling_limit(&instructions);

        assert_eq!(prepared.len(), instructions.len() + 1);
        assert!(is_set_compute_unit_limit(&prepared[0]));
        assert_eq!(limit_units(&prepared[0]), MAX_COMPUTE_UNITS);
        // Exactly one limit instruction total
        assert_eq!(
            prepared.iter().filter(|ix| is_set_compute_unit_limit(ix)).count(),
            1
        );
        // Originals shifted down by one, otherwise untouched
        assert_eq!(&prepared[1..], &instructions[..]);
    }

    #[test]
    fn test_existing_limit_replaced_in_place() {
        let instructions = vec![
            ComputeBudgetInstruction::set_compute_unit_price(10_000),
            ComputeBudgetInstruction::set_compute_unit_limit(10_000),
            dummy_instruction(),
        ];

        let prepared = with_ceiling_limit(&instructions);

        assert_eq!(prepared.len(), instructions.len());
        assert_eq!(prepared[0], instructions[0]);
        assert_eq!(prepared[2], instructions[2]);
        assert!(is_set_compute_unit_limit(&prepared[1]));
        assert_eq!(limit_units(&prepared[1]), MAX_COMPUTE_UNITS);
    }

    #[test]
    fn test_simulation_failure_joins_logs() {
        let logs = vec![
            "Program 11111111111111111111111111111111 invoke [1]".to_string(),
            "Program 11111111111111111111111111111111 failed".to_string(),
        ];
        let err = simulation_failure(&TransactionError::AccountNotFound, Some(&logs));

        let message = err.to_string();
        assert!(message.contains("Program 11111111111111111111111111111111 invoke [1]"));
        assert!(message.contains("\n  • "));
        assert!(message.contains("AccountNotFound"));
    }

    #[test]
    fn test_simulation_failure_without_logs() {
        let err = simulation_failure(&TransactionError::AccountNotFound, None);
        assert!(err.to_string().contains("No logs available"));

        let err = simulation_failure(&TransactionError::AccountNotFound, Some(&[]));
        assert!(err.to_string().contains("No logs available"));
    }

    #[test]
    fn test_limit_instruction_clamps_to_ceiling() {
        assert_eq!(limit_units(&limit_instruction(48_500)), 48_500);
        assert_eq!(
            limit_units(&limit_instruction(u64::from(MAX_COMPUTE_UNITS) + 1)),
            MAX_COMPUTE_UNITS
        );
        assert_eq!(limit_units(&limit_instruction(u64::MAX)), MAX_COMPUTE_UNITS);
    }

    #[test]
    fn test_simulated_units_sentinel() {
        assert_eq!(SimulatedUnits::Consumed(7).consumed(), Some(7));
        assert_eq!(SimulatedUnits::Unknown.consumed(), None);
        // A zero reading stays a reading, never the sentinel
        assert_eq!(SimulatedUnits::Consumed(0).consumed(), Some(0));
        assert_ne!(SimulatedUnits::Consumed(0), SimulatedUnits::Unknown);
    }

    proptest! {
        #[test]
        fn prop_limit_replaced_wherever_it_sits(
            (len, position) in (1usize..8).prop_flat_map(|len| (Just(len), 0..len))
        ) {
            let mut instructions: Vec<Instruction> =
                (0..len).map(|_| dummy_instruction()).collect();
            instructions[position] = ComputeBudgetInstruction::set_compute_unit_limit(10_000);

            let prepared = with_ceiling_limit(&instructions);

            prop_assert_eq!(prepared.len(), len);
            for (index, (before, after)) in instructions.iter().zip(&prepared).enumerate() {
                if index == position {
                    prop_assert!(is_set_compute_unit_limit(after));
                    prop_assert_eq!(limit_units(after), MAX_COMPUTE_UNITS);
                } else {
                    prop_assert_eq!(before, after);
                }
            }
        }
    }
}
