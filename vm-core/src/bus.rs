/// A 16-bit address space a CPU can read and write.
///
/// This is the seam between `lc3-cpu`'s instruction dispatcher and
/// whatever backs memory: a plain array in tests, or a memory-mapped
/// terminal in `lc3-term`. The CPU never reasons about what's on the
/// other side of this trait.
pub trait Bus {
    /// Read the word at `addr`.
    ///
    /// Implementations may synthesize a value instead of reading
    /// backing storage (memory-mapped I/O registers do this).
    fn read(&mut self, addr: u16) -> u16;

    /// Write `value` to `addr`.
    ///
    /// Implementations store unconditionally; there is no
    /// memory-mapped write behavior in this machine's address map.
    fn write(&mut self, addr: u16, value: u16);
}
