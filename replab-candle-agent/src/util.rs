//! Utilities.
use anyhow::{anyhow, Result};
use candle_nn::VarMap;
use log::trace;

/// Apply soft update on variables.
///
/// Variables are identified by their names.
///
/// dest = tau * src + (1.0 - tau) * dest
///
/// With `tau = 1.0` the variables of `dest` become a copy of `src`.
pub fn track(dest: &VarMap, src: &VarMap, tau: f64) -> Result<()> {
    let dest = dest
        .data()
        .lock()
        .map_err(|_| anyhow!("Lock of the destination variables is poisoned"))?;
    let src = src
        .data()
        .lock()
        .map_err(|_| anyhow!("Lock of the source variables is poisoned"))?;

    for (k_dest, v_dest) in dest.iter() {
        trace!("track {}", k_dest);
        let v_src = src
            .get(k_dest)
            .ok_or_else(|| anyhow!("Variable {} is not found in the source", k_dest))?;
        let t_src = v_src.as_tensor();
        let t_dest = v_dest.as_tensor();
        let t_dest = ((tau * t_src)? + (1.0 - tau) * t_dest)?;
        v_dest.set(&t_dest)?;
    }

    Ok(())
}
