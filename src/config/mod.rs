pub(crate) mod attr;

/// Options applied to every counter a session opens.
#[derive(Clone, Debug)]
pub struct Opts {
    pub exclude: Priv,

    /// New child tasks (processes and threads) inherit the counters.
    ///
    /// This applies only to tasks created after arming, not to the ones
    /// that already exist at that time.
    pub inherit: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            exclude: Priv::default(),
            inherit: true,
        }
    }
}

/// Privilege levels excluded from counting.
#[derive(Clone, Debug, Default)]
pub struct Priv {
    /// User space.
    pub user: bool,

    /// Kernel space.
    pub kernel: bool,

    /// Hypervisor.
    pub hv: bool,
}
