//! Group and station lookup functionality
//!
//! Query methods over a loaded registry: ordered listings, name search, and
//! joined views used by the report builder and the CLI reports.

use super::GroupRegistry;
use crate::app::models::{Station, SynopticGroup, SynopticGroupStation, Timeseries};
use crate::{Error, Result};

impl GroupRegistry {
    /// All group slugs, sorted
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }

    /// All groups, sorted by slug for deterministic iteration
    pub fn groups(&self) -> Vec<&SynopticGroup> {
        let mut groups: Vec<&SynopticGroup> = self.groups.values().collect();
        groups.sort_unstable_by(|a, b| a.slug.cmp(&b.slug));
        groups
    }

    /// Find groups whose display name contains the pattern (case-insensitive)
    pub fn find_groups_by_name(&self, pattern: &str) -> Vec<&SynopticGroup> {
        let pattern_lower = pattern.to_lowercase();
        let mut matches: Vec<&SynopticGroup> = self
            .groups
            .values()
            .filter(|group| group.name.to_lowercase().contains(&pattern_lower))
            .collect();
        matches.sort_unstable_by(|a, b| a.slug.cmp(&b.slug));
        matches
    }

    /// A group's member stations joined with their records, in display order
    pub fn stations_in_group(
        &self,
        slug: &str,
    ) -> Result<Vec<(&SynopticGroupStation, &Station)>> {
        let group = self
            .get_group(slug)
            .ok_or_else(|| Error::group_not_found(slug))?;

        let mut members: Vec<&SynopticGroupStation> = group.stations.iter().collect();
        members.sort_unstable_by_key(|member| member.order);

        members
            .into_iter()
            .map(|member| {
                let station = self
                    .get_station(member.station_id)
                    .ok_or_else(|| Error::station_not_found(member.station_id))?;
                Ok((member, station))
            })
            .collect()
    }

    /// A station's attached series joined with their records, in display order
    pub fn timeseries_for_station<'a>(
        &'a self,
        member: &'a SynopticGroupStation,
    ) -> Result<Vec<(&'a crate::app::models::SynopticTimeseries, &'a Timeseries)>> {
        let mut attached: Vec<_> = member.timeseries.iter().collect();
        attached.sort_unstable_by_key(|sts| sts.order);

        attached
            .into_iter()
            .map(|sts| {
                let ts = self
                    .get_timeseries(sts.timeseries_id)
                    .ok_or_else(|| Error::timeseries_not_found(sts.timeseries_id))?;
                Ok((sts, ts))
            })
            .collect()
    }
}
