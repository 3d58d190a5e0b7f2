use steel1d::prelude::*;

// Serialization through the flat buffer
//
// TEST GOAL
//
// Verifies that a material restored with recv_self at an arbitrary point of
// the analysis produces exactly the same outputs as the original one for
// all subsequent steps, in both implicit and IMPL-EX modes.

const STRAINS: [f64; 10] = [0.001, 0.0025, 0.004, 0.0035, 0.001, -0.002, -0.0045, -0.003, 0.0, 0.003];

fn run_and_compare(param: ParamSteel, split: usize) -> Result<(), MaterialError> {
    let mut original = Steel1D::new(param)?;
    for strain in &STRAINS[..split] {
        original.set_trial_strain(*strain, None)?;
        original.commit_state()?;
    }

    // restore into an empty instance
    let data = original.send_self();
    assert_eq!(data.len(), Steel1D::NDATA);
    let mut restored = Steel1D::default();
    restored.recv_self(&data)?;
    assert_eq!(restored.send_self(), data);

    // continue both
    for strain in &STRAINS[split..] {
        original.set_trial_strain(*strain, None)?;
        restored.set_trial_strain(*strain, None)?;
        assert_eq!(restored.stress().to_bits(), original.stress().to_bits());
        assert_eq!(restored.tangent().to_bits(), original.tangent().to_bits());
        assert_eq!(restored.implex_error(), original.implex_error());
        original.commit_state()?;
        restored.commit_state()?;
        assert_eq!(restored.energy().to_bits(), original.energy().to_bits());
    }
    assert_eq!(restored.send_self(), original.send_self());
    Ok(())
}

#[test]
fn test_send_recv_round_trip_implicit() -> Result<(), MaterialError> {
    for split in [0, 1, 3, 6, 9] {
        run_and_compare(SampleParams::param_steel(), split)?;
    }
    Ok(())
}

#[test]
fn test_send_recv_round_trip_implex() -> Result<(), MaterialError> {
    for split in [0, 1, 2, 5, 8] {
        run_and_compare(SampleParams::param_steel_implex(), split)?;
    }
    Ok(())
}

#[test]
fn test_send_recv_keeps_trial_state() -> Result<(), MaterialError> {
    let mut original = Steel1D::new(SampleParams::param_steel_implex())?;
    original.set_trial_strain(0.002, None)?;
    original.commit_state()?;
    original.set_trial_strain(0.003, None)?;

    let mut restored = Steel1D::default();
    restored.recv_self(&original.send_self())?;
    assert_eq!(restored.trial_state(), original.trial_state());
    assert_eq!(restored.committed_state(), original.committed_state());

    // committing the restored trial state gives the same committed state
    original.commit_state()?;
    restored.commit_state()?;
    assert_eq!(restored.committed_state(), original.committed_state());
    Ok(())
}

#[test]
fn test_send_recv_via_trait_object() -> Result<(), MaterialError> {
    let mut steel: Box<dyn UniaxialMaterial> = Box::new(Steel1D::new(SampleParams::param_steel())?);
    steel.set_trial_strain(0.003, None)?;
    steel.commit_state()?;
    let mut other: Box<dyn UniaxialMaterial> = Box::new(Steel1D::default());
    other.recv_self(&steel.send_self())?;
    assert_eq!(other.class_type(), "Steel1D");
    assert_eq!(other.stress(), steel.stress());
    assert_eq!(
        other.recv_self(&[0.0; 3]).err(),
        Some(MaterialError::BufferSizeMismatch { expected: 35, actual: 3 })
    );
    Ok(())
}
