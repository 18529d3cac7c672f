// Constants for the Misnomer interpreter

/// Default call budget of a run (nested user function calls, `main` included)
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Host stack reserved per nested call on the runner thread
/// Generous enough for unoptimized builds, where each interpreted call spans
/// a dozen or so host frames
pub const STACK_BYTES_PER_CALL: usize = 64 * 1024;

/// Smallest runner thread stack
pub const MIN_RUNNER_STACK_BYTES: usize = 16 * 1024 * 1024;

/// Largest runner thread stack
pub const MAX_RUNNER_STACK_BYTES: usize = 1024 * 1024 * 1024;

/// Runner thread stack size for a given call budget
pub fn runner_stack_bytes(max_call_depth: usize) -> usize {
    max_call_depth
        .saturating_mul(STACK_BYTES_PER_CALL)
        .clamp(MIN_RUNNER_STACK_BYTES, MAX_RUNNER_STACK_BYTES)
}
