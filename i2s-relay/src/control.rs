/// Enable/disable lifecycle shared by the I²S session and the board parts
/// hanging off it (e.g. the amplifier shutdown pin).
pub trait AudioControl {
    /// Error type for control operations.
    type Error;

    /// Power up / start the component.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Stop the component. It may be enabled again afterwards.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Whether the component is currently enabled.
    fn is_enabled(&self) -> bool;
}
