//! Property tests for deploy plan resolution.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use ballast::domain::entities::{DeployMode, DeployRequest, ResolvedDeployPlan};
use ballast::Settings;

fn ref_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9._/-]{0,24}").unwrap()
}

fn mode() -> impl Strategy<Value = DeployMode> {
    prop_oneof![
        Just(DeployMode::Auto),
        Just(DeployMode::Branch),
        Just(DeployMode::Tag),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The local deploy branch is always the remote branch plus
    /// `-deploy`, and the push refspec pairs the two.
    #[test]
    fn property_deploy_branch_tracks_remote_branch(
        branch in ref_name(),
        remote_branch in proptest::option::of(ref_name()),
        mode in mode(),
    ) {
        let request = DeployRequest {
            branch: Some(branch.clone()),
            remote: Some("git@example.com:site.git".to_string()),
            remote_branch: remote_branch.clone(),
            ..DeployRequest::default()
        };
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let plan = ResolvedDeployPlan::resolve(&request, mode, &Settings::default(), now).unwrap();

        let expected_remote = remote_branch.unwrap_or(branch);
        prop_assert_eq!(plan.remote_branch(), expected_remote.as_str());
        prop_assert_eq!(plan.deploy_branch(), format!("{expected_remote}-deploy"));
        prop_assert_eq!(plan.push_refspec(), format!("{expected_remote}-deploy:{expected_remote}"));
    }

    /// PROPERTY: Branch deploys never tag; tag deploys always do.
    #[test]
    fn property_mode_decides_tagging(
        branch in ref_name(),
        tag in proptest::option::of(ref_name()),
        build_id in proptest::option::of("[0-9a-f]{7}"),
    ) {
        let request = DeployRequest {
            branch: Some(branch.clone()),
            remote: Some("git@example.com:site.git".to_string()),
            tag: tag.clone(),
            build_id: build_id.clone(),
            ..DeployRequest::default()
        };
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let settings = Settings::default();

        let branch_plan = ResolvedDeployPlan::resolve(&request, DeployMode::Branch, &settings, now).unwrap();
        let auto_plan = ResolvedDeployPlan::resolve(&request, DeployMode::Auto, &settings, now).unwrap();
        let tag_plan = ResolvedDeployPlan::resolve(&request, DeployMode::Tag, &settings, now).unwrap();

        prop_assert_eq!(branch_plan.tag(), None);
        prop_assert_eq!(auto_plan.tag(), tag.as_deref());
        let expected = tag.unwrap_or_else(|| match build_id {
            Some(id) => format!("{branch}-{id}"),
            None => format!("{branch}-1700000000"),
        });
        prop_assert_eq!(tag_plan.tag(), Some(expected.as_str()));
    }

    /// PROPERTY: Blank remotes and branches are rejected whatever the mode.
    #[test]
    fn property_blank_required_options_are_rejected(
        blank in "[ \t]{0,4}",
        mode in mode(),
        drop_remote in any::<bool>(),
    ) {
        let mut request = DeployRequest {
            branch: Some("main".to_string()),
            remote: Some("git@example.com:site.git".to_string()),
            ..DeployRequest::default()
        };
        if drop_remote {
            request.remote = Some(blank);
        } else {
            request.branch = Some(blank);
        }

        let result = ResolvedDeployPlan::resolve(&request, mode, &Settings::default(), Utc::now());

        prop_assert!(result.is_err());
    }
}
