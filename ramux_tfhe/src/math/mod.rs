/// Balanced radix (gadget) decomposition.
pub mod decomposition;

/// Negacyclic FFTs over `Z_q[X]/(X^N + 1)`.
pub mod fft;

/// Sampling keys, masks and noise.
pub mod rand;
